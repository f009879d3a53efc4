// SPDX-FileCopyrightText: 2026 Pairchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Whole-state flush and load.
//!
//! A flush replaces every table's contents in a single transaction, so the
//! file always holds one consistent snapshot.

use std::collections::BTreeMap;
use std::str::FromStr;

use pairchat_core::types::{Gender, Profile, RatingTally, Sanction, SanctionKind};
use pairchat_core::{PairchatError, StateSnapshot, UserId};
use rusqlite::types::Type;
use rusqlite::{Connection, Transaction, params};

use crate::database::{Database, map_tr_err};

const TABLES: &[&str] = &[
    "sanctions",
    "sanction_subjects",
    "profiles",
    "dialogs",
    "search_queue",
    "blacklist",
    "last_partners",
    "pending_ratings",
    "ratings",
    "reports",
];

/// Durably writes `snapshot`, replacing whatever was stored.
pub async fn flush(db: &Database, snapshot: &StateSnapshot) -> Result<(), PairchatError> {
    let snapshot = snapshot.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            let tx = conn.transaction()?;
            write_all(&tx, &snapshot)?;
            tx.commit()
        })
        .await
        .map_err(map_tr_err)
}

/// Reads the stored snapshot. An empty database yields the default snapshot.
pub async fn load(db: &Database) -> Result<StateSnapshot, PairchatError> {
    db.connection()
        .call(|conn| read_all(conn))
        .await
        .map_err(map_tr_err)
}

fn write_all(tx: &Transaction<'_>, s: &StateSnapshot) -> Result<(), rusqlite::Error> {
    for table in TABLES {
        tx.execute(&format!("DELETE FROM {table}"), [])?;
    }

    let mut stmt = tx.prepare("INSERT INTO profiles (user_id, gender, age) VALUES (?1, ?2, ?3)")?;
    for (user, profile) in &s.profiles {
        stmt.execute(params![user.0, profile.gender.to_string(), profile.age])?;
    }

    let mut stmt = tx.prepare("INSERT INTO dialogs (user_id, partner_id) VALUES (?1, ?2)")?;
    for (user, partner) in &s.dialogs {
        stmt.execute(params![user.0, partner.0])?;
    }

    let mut stmt = tx.prepare("INSERT INTO search_queue (position, user_id) VALUES (?1, ?2)")?;
    for (position, user) in s.queue.iter().enumerate() {
        stmt.execute(params![position as i64, user.0])?;
    }

    let mut stmt = tx.prepare(
        "INSERT OR IGNORE INTO blacklist (user_id, blocked_id, position) VALUES (?1, ?2, ?3)",
    )?;
    for (user, peers) in &s.blacklist {
        for (position, peer) in peers.iter().enumerate() {
            stmt.execute(params![user.0, peer.0, position as i64])?;
        }
    }

    let mut stmt =
        tx.prepare("INSERT INTO last_partners (user_id, partner_id) VALUES (?1, ?2)")?;
    for (user, partner) in &s.last_partners {
        stmt.execute(params![user.0, partner.0])?;
    }

    let mut stmt =
        tx.prepare("INSERT INTO pending_ratings (user_id, partner_id) VALUES (?1, ?2)")?;
    for (user, partner) in &s.pending_ratings {
        stmt.execute(params![user.0, partner.0])?;
    }

    let mut stmt = tx.prepare("INSERT INTO ratings (user_id, total, count) VALUES (?1, ?2, ?3)")?;
    for (user, tally) in &s.ratings {
        stmt.execute(params![user.0, tally.total, tally.count])?;
    }

    let mut stmt = tx.prepare("INSERT INTO reports (user_id, count) VALUES (?1, ?2)")?;
    for (user, count) in &s.reports {
        stmt.execute(params![user.0, count])?;
    }

    let mut subject = tx.prepare("INSERT INTO sanction_subjects (user_id) VALUES (?1)")?;
    let mut sanction = tx.prepare(
        "INSERT INTO sanctions (user_id, kind, until, issued_by, note) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for (user, record) in &s.sanctions {
        subject.execute(params![user.0])?;
        for kind in [SanctionKind::Ban, SanctionKind::Mute] {
            if let Some(sn) = record.get(kind) {
                sanction.execute(params![
                    user.0,
                    kind.to_string(),
                    sn.until,
                    sn.issued_by.0,
                    sn.note
                ])?;
            }
        }
    }

    Ok(())
}

fn read_all(conn: &Connection) -> Result<StateSnapshot, rusqlite::Error> {
    let mut s = StateSnapshot::default();

    let mut stmt = conn.prepare("SELECT user_id, gender, age FROM profiles")?;
    let rows = stmt.query_map([], |row| {
        let gender: String = row.get(1)?;
        Ok((
            UserId(row.get(0)?),
            Profile {
                gender: parse_text::<Gender>(1, &gender)?,
                age: row.get(2)?,
            },
        ))
    })?;
    for row in rows {
        let (user, profile) = row?;
        s.profiles.insert(user, profile);
    }

    s.dialogs = read_pairs(conn, "SELECT user_id, partner_id FROM dialogs")?;

    let mut stmt = conn.prepare("SELECT user_id FROM search_queue ORDER BY position")?;
    s.queue = stmt
        .query_map([], |row| Ok(UserId(row.get(0)?)))?
        .collect::<Result<_, _>>()?;

    let mut stmt =
        conn.prepare("SELECT user_id, blocked_id FROM blacklist ORDER BY user_id, position")?;
    let rows = stmt.query_map([], |row| Ok((UserId(row.get(0)?), UserId(row.get(1)?))))?;
    for row in rows {
        let (user, peer) = row?;
        s.blacklist.entry(user).or_default().push(peer);
    }

    s.last_partners = read_pairs(conn, "SELECT user_id, partner_id FROM last_partners")?;
    s.pending_ratings = read_pairs(conn, "SELECT user_id, partner_id FROM pending_ratings")?;

    let mut stmt = conn.prepare("SELECT user_id, total, count FROM ratings")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            UserId(row.get(0)?),
            RatingTally {
                total: row.get(1)?,
                count: row.get(2)?,
            },
        ))
    })?;
    for row in rows {
        let (user, tally) = row?;
        s.ratings.insert(user, tally);
    }

    let mut stmt = conn.prepare("SELECT user_id, count FROM reports")?;
    let rows = stmt.query_map([], |row| Ok((UserId(row.get(0)?), row.get::<_, u32>(1)?)))?;
    for row in rows {
        let (user, count) = row?;
        s.reports.insert(user, count);
    }

    let mut stmt = conn.prepare("SELECT user_id FROM sanction_subjects")?;
    let rows = stmt.query_map([], |row| Ok(UserId(row.get(0)?)))?;
    for row in rows {
        s.sanctions.entry(row?).or_default();
    }

    let mut stmt =
        conn.prepare("SELECT user_id, kind, until, issued_by, note FROM sanctions")?;
    let rows = stmt.query_map([], |row| {
        let kind: String = row.get(1)?;
        Ok((
            UserId(row.get(0)?),
            parse_text::<SanctionKind>(1, &kind)?,
            Sanction {
                until: row.get(2)?,
                issued_by: UserId(row.get(3)?),
                note: row.get(4)?,
            },
        ))
    })?;
    for row in rows {
        let (user, kind, sanction) = row?;
        *s.sanctions.entry(user).or_default().slot_mut(kind) = Some(sanction);
    }

    Ok(s)
}

fn read_pairs(
    conn: &Connection,
    sql: &str,
) -> Result<BTreeMap<UserId, UserId>, rusqlite::Error> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| Ok((UserId(row.get(0)?), UserId(row.get(1)?))))?;
    rows.collect()
}

fn parse_text<T>(column: usize, value: &str) -> Result<T, rusqlite::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    T::from_str(value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}
