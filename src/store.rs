use std::path::Path;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::common::error::LedgerError;
use crate::common::money::Money;
use crate::domain::account::{Account, AccountKind};
use crate::domain::transaction::{TransactionRecord, TxAction};

/// SQLite-backed store for accounts and their transaction logs.
///
/// Owns the single connection; callers receive a `&mut Store` instead of
/// opening connections of their own. All writes are synchronous and a
/// deposit/withdraw write-through commits the transaction row and the new
/// balance atomically.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        debug!(path = %path.as_ref().display(), "opening database");
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, LedgerError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Creates the schema if it does not exist yet. Safe to call on every
    /// start.
    pub fn create_tables(&self) -> Result<(), LedgerError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE,
                password TEXT
            )",
            [],
        )?;
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                user_id TEXT,
                type TEXT,
                savings INTEGER
            )",
            [],
        )?;
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS transactions (
                tag TEXT PRIMARY KEY,
                date TEXT,
                action TEXT,
                amount INTEGER,
                account_id TEXT REFERENCES accounts(id)
            )",
            [],
        )?;
        debug!("schema ready");
        Ok(())
    }

    /// Insert-or-replace keyed by account id. Last writer wins.
    pub fn upsert_account(&self, account: &Account) -> Result<(), LedgerError> {
        debug!(account = %account.id, balance = %account.balance, "upserting account");
        self.conn.execute(
            "INSERT OR REPLACE INTO accounts (id, user_id, type, savings)
             VALUES (?1, ?2, ?3, ?4)",
            params![account.id, account.user_id, account.kind, account.balance],
        )?;
        Ok(())
    }

    pub fn fetch_account(&self, id: &str) -> Result<Option<Account>, LedgerError> {
        let account = self
            .conn
            .query_row(
                "SELECT id, user_id, type, savings FROM accounts WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Account {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        kind: row.get(2)?,
                        balance: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(account)
    }

    /// Appends one transaction record and upserts the account's new balance
    /// in a single SQL transaction, so a deposit/withdraw is either fully
    /// durable or not recorded at all. A tag already present in the log is
    /// reported as `TagCollision` rather than overwritten.
    pub fn record_transaction(
        &mut self,
        account: &Account,
        record: &TransactionRecord,
    ) -> Result<(), LedgerError> {
        debug!(account = %account.id, tag = %record.tag, action = %record.action, "recording transaction");
        let tx = self.conn.transaction()?;
        let inserted = tx.execute(
            "INSERT INTO transactions (tag, date, action, amount, account_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.tag,
                record.date,
                record.action,
                record.amount,
                record.account_id
            ],
        );
        if let Err(err) = inserted {
            return Err(match err {
                rusqlite::Error::SqliteFailure(e, _)
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    LedgerError::TagCollision(record.tag.clone())
                }
                other => other.into(),
            });
        }
        tx.execute(
            "INSERT OR REPLACE INTO accounts (id, user_id, type, savings)
             VALUES (?1, ?2, ?3, ?4)",
            params![account.id, account.user_id, account.kind, account.balance],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// All transactions for one account, in the order storage returns them.
    pub fn transactions_for(&self, account_id: &str) -> Result<Vec<TransactionRecord>, LedgerError> {
        let mut stmt = self.conn.prepare(
            "SELECT tag, date, action, amount, account_id
             FROM transactions WHERE account_id = ?1",
        )?;
        let rows = stmt.query_map(params![account_id], |row| {
            Ok(TransactionRecord {
                tag: row.get(0)?,
                date: row.get(1)?,
                action: row.get(2)?,
                amount: row.get(3)?,
                account_id: row.get(4)?,
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}

impl ToSql for Money {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_i64()))
    }
}

impl FromSql for Money {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Money::from_i64)
    }
}

impl ToSql for AccountKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for AccountKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        AccountKind::from_str(s).map_err(|e| FromSqlError::Other(e.into()))
    }
}

impl ToSql for TxAction {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TxAction {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        TxAction::from_str(s).map_err(|e| FromSqlError::Other(e.into()))
    }
}
