//! Address-keyed pet gateway and its SQLite implementation.
//!
//! # Responsibility
//! - Resolve raw addresses into table-scoped query/insert/update/delete calls.
//! - Validate field maps before any SQL mutation is prepared.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Unrecognized addresses fail with `UnknownAddress` on every operation.
//! - Item addresses always scope by `_id = ?`; caller selections are dropped.
//! - Store rejections of validated writes are soft: `None` / `0`, logged.
//! - The gateway keeps no pet state between calls.

use crate::db::DbError;
use crate::model::address::{match_address, ContentType, PetAddress};
use crate::model::contract::{PetColumn, COLUMN_ID, TABLE_NAME};
use crate::model::pet::{Gender, PetId, PetRecord};
use crate::model::values::{FieldValue, PetValidationError, PetValues};
use log::{debug, error, info};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row, Statement};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors surfaced by gateway operations.
///
/// Store rejections of validated writes are not represented here; they are
/// reported through `Ok(None)` / `Ok(0)` so callers can react without
/// unwinding.
#[derive(Debug)]
pub enum GatewayError {
    /// Address text matches neither the collection nor the item shape.
    UnknownAddress(String),
    /// Operation is not legal for this address shape.
    UnsupportedAddress {
        operation: &'static str,
        address: PetAddress,
    },
    /// Field map holds a value the table must never contain.
    Validation(PetValidationError),
    /// Read failure, or a caller selection SQLite refused to prepare.
    Db(DbError),
    /// Connection does not expose the `pets` table.
    MissingRequiredTable(&'static str),
    /// `pets` table lacks one of the five contract columns.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Stored row cannot be converted into a pet record.
    InvalidData(String),
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAddress(raw) => write!(f, "unknown pet address `{raw}`"),
            Self::UnsupportedAddress { operation, address } => {
                write!(f, "{operation} is not supported for {address}")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "pet gateway requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "pet gateway requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted pet data: {message}"),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PetValidationError> for GatewayError {
    fn from(value: PetValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for GatewayError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for GatewayError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw SQL filter with positional `?` arguments, e.g. `breed = ?`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub clause: String,
    pub args: Vec<FieldValue>,
}

impl Selection {
    pub fn new(clause: impl Into<String>, args: Vec<FieldValue>) -> Self {
        Self {
            clause: clause.into(),
            args,
        }
    }

    fn bind_values(&self) -> impl Iterator<Item = Value> + '_ {
        self.args.iter().map(FieldValue::to_sql_value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Read request: projection, filter and ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetQuery {
    /// Columns to return in order. Empty means every column.
    pub columns: Vec<PetColumn>,
    /// Ignored for item addresses.
    pub selection: Option<Selection>,
    pub order: Vec<(PetColumn, SortDirection)>,
}

impl PetQuery {
    /// Every column, no filter, store order.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn order_by(mut self, column: PetColumn, direction: SortDirection) -> Self {
        self.order.push((column, direction));
        self
    }

    pub fn filter(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    fn projection(&self) -> Vec<PetColumn> {
        if self.columns.is_empty() {
            PetColumn::ALL.to_vec()
        } else {
            self.columns.clone()
        }
    }
}

/// Single-pass sequence over query results.
///
/// Rows are read eagerly into memory before `query` returns; the cursor holds
/// no statement or connection borrow.
#[derive(Debug)]
pub struct PetCursor {
    columns: Vec<PetColumn>,
    records: std::vec::IntoIter<PetRecord>,
}

impl PetCursor {
    /// Columns populated on every record, in projection order.
    pub fn columns(&self) -> &[PetColumn] {
        &self.columns
    }
}

impl Iterator for PetCursor {
    type Item = PetRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for PetCursor {}

/// Address-keyed access to the pet store.
pub trait PetGateway {
    fn query(&self, address: &str, request: &PetQuery) -> GatewayResult<PetCursor>;
    /// Returns the new item address, or `None` when the store rejected the row.
    fn insert(&self, address: &str, values: &PetValues) -> GatewayResult<Option<PetAddress>>;
    /// Returns rows modified; `0` covers not-found, no-op and store rejection.
    fn update(
        &self,
        address: &str,
        values: &PetValues,
        selection: Option<&Selection>,
    ) -> GatewayResult<usize>;
    /// Returns rows removed; `0` covers not-found and store rejection.
    fn delete(&self, address: &str, selection: Option<&Selection>) -> GatewayResult<usize>;
    fn resolve_type(&self, address: &str) -> GatewayResult<ContentType>;
}

/// SQLite-backed pet gateway bound to one connection.
pub struct SqlitePetGateway<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePetGateway<'conn> {
    /// Binds a gateway to a connection that already holds the `pets` table.
    ///
    /// # Errors
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the layout is
    ///   absent or incomplete. The gateway never creates schema.
    pub fn try_new(conn: &'conn Connection) -> GatewayResult<Self> {
        ensure_pets_table(conn)?;
        Ok(Self { conn })
    }
}

impl PetGateway for SqlitePetGateway<'_> {
    fn query(&self, address: &str, request: &PetQuery) -> GatewayResult<PetCursor> {
        let address = resolve(address)?;
        let columns = request.projection();
        let column_list = columns
            .iter()
            .map(|column| column.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let mut sql = format!("SELECT {column_list} FROM {TABLE_NAME}");
        let (where_sql, bind_values) = scope(address, request.selection.as_ref(), "query");
        sql.push_str(&where_sql);

        if !request.order.is_empty() {
            let order = request
                .order
                .iter()
                .map(|(column, direction)| match direction {
                    SortDirection::Ascending => format!("{} ASC", column.as_str()),
                    SortDirection::Descending => format!("{} DESC", column.as_str()),
                })
                .collect::<Vec<_>>()
                .join(", ");
            sql.push_str(" ORDER BY ");
            sql.push_str(&order);
        }

        let mut stmt = self.conn.prepare(&sql)?;
        ensure_bind_count(&stmt, bind_values.len())?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_pet_row(row, &columns)?);
        }

        debug!(
            "event=pet_query module=gateway status=ok address={} rows={}",
            address.path(),
            records.len()
        );
        Ok(PetCursor {
            columns,
            records: records.into_iter(),
        })
    }

    fn insert(&self, address: &str, values: &PetValues) -> GatewayResult<Option<PetAddress>> {
        let address = resolve(address)?;
        if let PetAddress::Item(_) = address {
            return Err(GatewayError::UnsupportedAddress {
                operation: "insert",
                address,
            });
        }

        let validated = values.validate_for_insert()?;
        let column_list = validated
            .columns()
            .map(|column| column.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; validated.len()].join(", ");
        let sql = format!("INSERT INTO {TABLE_NAME} ({column_list}) VALUES ({placeholders})");

        let mut stmt = self.conn.prepare(&sql)?;
        ensure_bind_count(&stmt, validated.len())?;
        match stmt.insert(params_from_iter(validated.into_values())) {
            Ok(id) => {
                info!("event=pet_insert module=gateway status=ok pet_id={id}");
                Ok(Some(PetAddress::Item(id)))
            }
            Err(err) => {
                error!(
                    "event=pet_insert module=gateway status=error error_code=write_failed address={} error={}",
                    address.path(),
                    err
                );
                Ok(None)
            }
        }
    }

    fn update(
        &self,
        address: &str,
        values: &PetValues,
        selection: Option<&Selection>,
    ) -> GatewayResult<usize> {
        let address = resolve(address)?;
        let validated = values.validate_present()?;
        if validated.is_empty() {
            return Ok(0);
        }

        let assignments = validated
            .columns()
            .map(|column| format!("{} = ?", column.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        let (where_sql, scope_values) = scope(address, selection, "update");
        let sql = format!("UPDATE {TABLE_NAME} SET {assignments}{where_sql}");
        let bind_values = validated
            .into_values()
            .chain(scope_values)
            .collect::<Vec<_>>();

        let mut stmt = self.conn.prepare(&sql)?;
        ensure_bind_count(&stmt, bind_values.len())?;
        match stmt.execute(params_from_iter(bind_values)) {
            Ok(changed) => {
                info!(
                    "event=pet_update module=gateway status=ok address={} rows={}",
                    address.path(),
                    changed
                );
                Ok(changed)
            }
            Err(err) => {
                error!(
                    "event=pet_update module=gateway status=error error_code=write_failed address={} error={}",
                    address.path(),
                    err
                );
                Ok(0)
            }
        }
    }

    fn delete(&self, address: &str, selection: Option<&Selection>) -> GatewayResult<usize> {
        let address = resolve(address)?;
        let (where_sql, bind_values) = scope(address, selection, "delete");
        let sql = format!("DELETE FROM {TABLE_NAME}{where_sql}");

        let mut stmt = self.conn.prepare(&sql)?;
        ensure_bind_count(&stmt, bind_values.len())?;
        match stmt.execute(params_from_iter(bind_values)) {
            Ok(removed) => {
                info!(
                    "event=pet_delete module=gateway status=ok address={} rows={}",
                    address.path(),
                    removed
                );
                Ok(removed)
            }
            Err(err) => {
                error!(
                    "event=pet_delete module=gateway status=error error_code=write_failed address={} error={}",
                    address.path(),
                    err
                );
                Ok(0)
            }
        }
    }

    fn resolve_type(&self, address: &str) -> GatewayResult<ContentType> {
        Ok(resolve(address)?.content_type())
    }
}

fn resolve(raw: &str) -> GatewayResult<PetAddress> {
    match_address(raw).address().ok_or_else(|| {
        error!("event=address_match module=gateway status=error error_code=unknown_address");
        GatewayError::UnknownAddress(raw.to_string())
    })
}

/// Rejects a bind list whose length differs from the statement's placeholders.
///
/// rusqlite only notices the mismatch at execution time, where update and
/// delete would otherwise report it as a soft store rejection.
fn ensure_bind_count(stmt: &Statement<'_>, given: usize) -> GatewayResult<()> {
    let expected = stmt.parameter_count();
    if given != expected {
        error!(
            "event=bind_check module=gateway status=error error_code=parameter_count given={given} expected={expected}"
        );
        return Err(rusqlite::Error::InvalidParameterCount(given, expected).into());
    }
    Ok(())
}

/// Builds the `WHERE` fragment and its bind values for `address`.
fn scope(
    address: PetAddress,
    selection: Option<&Selection>,
    operation: &'static str,
) -> (String, Vec<Value>) {
    match address {
        PetAddress::Item(id) => {
            if selection.is_some() {
                debug!(
                    "event=selection_dropped module=gateway status=ok operation={operation} pet_id={id}"
                );
            }
            (format!(" WHERE {COLUMN_ID} = ?"), vec![Value::Integer(id)])
        }
        PetAddress::Collection => match selection {
            Some(selection) if !selection.clause.trim().is_empty() => (
                format!(" WHERE ({})", selection.clause),
                selection.bind_values().collect(),
            ),
            _ => (String::new(), Vec::new()),
        },
    }
}

fn parse_pet_row(row: &Row<'_>, columns: &[PetColumn]) -> GatewayResult<PetRecord> {
    let mut record = PetRecord::default();
    for (index, column) in columns.iter().enumerate() {
        match column {
            PetColumn::Id => record.id = Some(row.get::<_, PetId>(index)?),
            PetColumn::Name => record.name = row.get(index)?,
            PetColumn::Breed => record.breed = row.get(index)?,
            PetColumn::Gender => {
                let code: i64 = row.get(index)?;
                let gender = Gender::from_code(code).ok_or_else(|| {
                    GatewayError::InvalidData(format!("invalid gender code `{code}` in pets.gender"))
                })?;
                record.gender = Some(gender);
            }
            PetColumn::Weight => {
                let weight: i64 = row.get(index)?;
                if weight < 0 {
                    return Err(GatewayError::InvalidData(format!(
                        "negative weight `{weight}` in pets.weight"
                    )));
                }
                record.weight = Some(weight);
            }
        }
    }
    Ok(record)
}

fn ensure_pets_table(conn: &Connection) -> GatewayResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [TABLE_NAME],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(GatewayError::MissingRequiredTable(TABLE_NAME));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({TABLE_NAME});"))?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<rusqlite::Result<HashSet<_>>>()?;

    for column in PetColumn::ALL {
        if !present.contains(column.as_str()) {
            return Err(GatewayError::MissingRequiredColumn {
                table: TABLE_NAME,
                column: column.as_str(),
            });
        }
    }
    Ok(())
}
