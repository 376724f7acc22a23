//! CSV import
//!
//! Format: `date,type,amount,category,description[,notes]` with a header row.
//! Columns are matched by header name, so order may vary and `notes` may be
//! omitted. A blank `type` falls back to the amount's sign: negative amounts
//! are expenses, everything else is income. Stored amounts are always
//! non-negative.

use std::collections::HashMap;
use std::io::Read;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{NewTransaction, TransactionType};

const DEFAULT_EXPENSE_CATEGORY: &str = "Other";
const DEFAULT_INCOME_CATEGORY: &str = "Other Income";

/// Column positions resolved from the header row
struct Columns {
    date: usize,
    kind: Option<usize>,
    amount: usize,
    category: Option<usize>,
    description: Option<usize>,
    notes: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();

        let required = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| Error::Import(format!("Missing '{}' column", name)))
        };

        Ok(Self {
            date: required("date")?,
            kind: index.get("type").or_else(|| index.get("kind")).copied(),
            amount: required("amount")?,
            category: index.get("category").copied(),
            description: index.get("description").copied(),
            notes: index.get("notes").copied(),
        })
    }
}

/// Parse transactions from CSV data
///
/// Fails on the first malformed row, reporting its line number.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<NewTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut transactions = Vec::new();
    // Identical rows within one file are separate purchases
    let mut seen: HashMap<String, u32> = HashMap::new();

    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is line 1
        let line = row + 2;
        let mut tx = parse_record(&record, &columns).map_err(|e| match e {
            Error::Import(msg) => Error::Import(format!("Line {}: {}", line, msg)),
            other => other,
        })?;

        let occurrence = seen.entry(tx.import_hash.clone()).or_insert(0);
        if *occurrence > 0 {
            tx.import_hash = generate_hash_with_occurrence(
                &tx.date,
                tx.kind,
                tx.amount,
                &tx.category,
                &tx.description,
                *occurrence,
            );
        }
        *occurrence += 1;

        transactions.push(tx);
    }

    debug!("Parsed {} transactions", transactions.len());
    Ok(transactions)
}

fn parse_record(record: &StringRecord, columns: &Columns) -> Result<NewTransaction> {
    let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("").trim();

    let date = parse_date(field(Some(columns.date)))?;
    let signed = parse_amount(field(Some(columns.amount)))?;

    let kind = match field(columns.kind) {
        "" if signed < 0.0 => TransactionType::Expense,
        "" => TransactionType::Income,
        s => s.parse::<TransactionType>().map_err(Error::Import)?,
    };
    let amount = signed.abs();

    let category = match field(columns.category) {
        "" => match kind {
            TransactionType::Income => DEFAULT_INCOME_CATEGORY,
            TransactionType::Expense => DEFAULT_EXPENSE_CATEGORY,
        },
        s => s,
    }
    .to_string();

    let description = field(columns.description).to_string();
    let notes = Some(field(columns.notes).to_string()).filter(|s| !s.is_empty());
    let import_hash = generate_hash(&date, kind, amount, &category, &description);

    Ok(NewTransaction {
        kind,
        amount,
        category,
        date,
        description,
        notes,
        import_hash,
    })
}

/// Deterministic hash used to skip re-imported rows
pub fn generate_hash(
    date: &NaiveDate,
    kind: TransactionType,
    amount: f64,
    category: &str,
    description: &str,
) -> String {
    generate_hash_with_occurrence(date, kind, amount, category, description, 0)
}

/// Hash for the n-th repeat of an identical row within one file
///
/// Occurrence 0 hashes the same as `generate_hash`, so re-importing a file
/// still maps every row onto its earlier copy.
fn generate_hash_with_occurrence(
    date: &NaiveDate,
    kind: TransactionType,
    amount: f64,
    category: &str,
    description: &str,
    occurrence: u32,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_string().as_bytes());
    hasher.update(kind.as_str().as_bytes());
    hasher.update(amount.to_be_bytes());
    hasher.update(category.as_bytes());
    hasher.update(description.as_bytes());
    if occurrence > 0 {
        hasher.update(occurrence.to_be_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Parse `YYYY-MM-DD` or `MM/DD/YYYY`
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    ["%Y-%m-%d", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount, tolerating currency symbols, thousands separators and
/// accounting-style parentheses
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .ok_or_else(|| Error::Import(format!("Unable to parse amount: {}", s)))
}
