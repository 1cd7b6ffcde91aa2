//! Unit-price catalog lookup.
//!
//! The catalog is a read-only reference table held in `SQLite` through SeaORM,
//! seeded once at startup and extended only by ad hoc additions. Searches match
//! a code prefix or a case-insensitive description substring; the term is bound
//! as a parameter with its LIKE wildcards escaped.
//!
//! [`CatalogGate`] wraps the service so callers can search while the load is
//! still running: until the catalog is ready every search fails with
//! `Error::CatalogNotReady` instead of waiting.

use crate::{
    config::{CatalogSeed, database},
    entities::{CatalogEntry, CatalogEntryModel, catalog_entry},
    errors::{Error, Result},
    models::Unit,
};
use sea_orm::{
    Condition, PaginatorTrait, QueryOrder, QuerySelect, Set, prelude::*, sea_query::LikeExpr,
};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Maximum number of rows a search returns.
pub const SEARCH_LIMIT: u64 = 25;

const LIKE_ESCAPE: char = '\\';

/// Lowercases for matching, folding the Turkish dotted capital İ to a plain `i`.
#[must_use]
pub fn fold_case(text: &str) -> String {
    text.chars()
        .flat_map(|c| match c {
            'İ' => vec!['i'],
            other => other.to_lowercase().collect(),
        })
        .collect()
}

/// Escapes `%`, `_` and the escape character itself for a LIKE pattern.
#[must_use]
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Checks a catalog addition and normalizes its unit to the display form.
///
/// # Errors
/// Returns `Error::Validation` for an empty code or description or an unknown
/// unit, `Error::InvalidAmount` for a negative or non-finite price.
pub fn validate_seed(seed: &CatalogSeed) -> Result<Unit> {
    for (field, value) in [("code", &seed.code), ("description", &seed.description)] {
        if value.trim().is_empty() {
            return Err(Error::Validation {
                field,
                message: format!("{field} cannot be empty"),
            });
        }
    }
    let unit: Unit = seed.unit.parse()?;

    if !seed.unit_price.is_finite() || seed.unit_price < 0.0 {
        return Err(Error::InvalidAmount {
            amount: seed.unit_price,
        });
    }

    Ok(unit)
}

/// Owned handle to the catalog database.
#[derive(Debug)]
pub struct CatalogSearch {
    db: DatabaseConnection,
}

impl CatalogSearch {
    /// Opens the database and makes sure the catalog table exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let db = database::create_connection(database_url).await?;
        database::create_tables(&db).await?;
        debug!("Catalog database ready at {database_url}");
        Ok(Self { db })
    }

    /// Loads seed entries, skipping invalid or duplicate ones. Returns how
    /// many were inserted.
    pub async fn seed(&self, seeds: &[CatalogSeed]) -> Result<usize> {
        let mut inserted = 0;
        for seed in seeds {
            match self.add_entry(seed).await {
                Ok(_) => inserted += 1,
                Err(Error::Database(e)) => return Err(Error::Database(e)),
                Err(e) => warn!("Skipping catalog seed {}: {}", seed.code, e),
            }
        }
        info!("Catalog seeded with {inserted} of {} entries", seeds.len());
        Ok(inserted)
    }

    /// Adds one entry after validation.
    ///
    /// # Errors
    /// Validation errors as in [`validate_seed`]; `Error::Validation` on the
    /// `code` field when the code is already listed.
    pub async fn add_entry(&self, seed: &CatalogSeed) -> Result<CatalogEntryModel> {
        let unit = validate_seed(seed)?;
        let code = seed.code.trim();

        if self.find_by_code(code).await?.is_some() {
            return Err(Error::Validation {
                field: "code",
                message: format!("{code} is already in the catalog"),
            });
        }

        let description = seed.description.trim();
        let entry = catalog_entry::ActiveModel {
            code: Set(code.to_string()),
            description: Set(description.to_string()),
            description_folded: Set(fold_case(description)),
            unit: Set(unit.as_str().to_string()),
            unit_price: Set(seed.unit_price),
            category: Set(seed.category.trim().to_string()),
            ..Default::default()
        };
        entry.insert(&self.db).await.map_err(Into::into)
    }

    /// Exact code lookup.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<CatalogEntryModel>> {
        CatalogEntry::find()
            .filter(catalog_entry::Column::Code.eq(code.trim()))
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    /// Exact code lookup that fails when the code is not listed.
    ///
    /// # Errors
    /// Returns `Error::CatalogEntryNotFound` for an unknown code.
    pub async fn get_by_code(&self, code: &str) -> Result<CatalogEntryModel> {
        self.find_by_code(code)
            .await?
            .ok_or_else(|| Error::CatalogEntryNotFound {
                code: code.trim().to_string(),
            })
    }

    /// Up to [`SEARCH_LIMIT`] entries whose code starts with the term or whose
    /// description contains it, ordered by code. A blank term matches nothing.
    pub async fn search(&self, term: &str) -> Result<Vec<CatalogEntryModel>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let code_prefix = format!("{}%", escape_like(term));
        let description_part = format!("%{}%", escape_like(&fold_case(term)));

        let entries = CatalogEntry::find()
            .filter(
                Condition::any()
                    .add(
                        catalog_entry::Column::Code
                            .like(LikeExpr::new(code_prefix).escape(LIKE_ESCAPE)),
                    )
                    .add(
                        catalog_entry::Column::DescriptionFolded
                            .like(LikeExpr::new(description_part).escape(LIKE_ESCAPE)),
                    ),
            )
            .order_by_asc(catalog_entry::Column::Code)
            .limit(SEARCH_LIMIT)
            .all(&self.db)
            .await?;

        debug!("Catalog search '{term}' matched {} entries", entries.len());
        Ok(entries)
    }

    /// Number of entries in the catalog.
    pub async fn count(&self) -> Result<u64> {
        CatalogEntry::find()
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    /// Closes the underlying connection.
    pub async fn close(self) -> Result<()> {
        self.db.close().await.map_err(Into::into)
    }
}

/// Ready gate around a catalog that loads in the background.
#[derive(Debug, Default)]
pub struct CatalogGate {
    catalog: OnceCell<CatalogSearch>,
}

impl CatalogGate {
    /// An empty gate; nothing is readable until [`CatalogGate::load`] succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects and seeds the catalog, opening the gate on success. Calling it
    /// again after a successful load returns the loaded catalog untouched.
    pub async fn load(&self, database_url: &str, seeds: &[CatalogSeed]) -> Result<&CatalogSearch> {
        self.catalog
            .get_or_try_init(|| async move {
                info!("Loading unit-price catalog...");
                let catalog = CatalogSearch::connect(database_url).await?;
                catalog.seed(seeds).await?;
                Ok(catalog)
            })
            .await
    }

    /// Whether the catalog finished loading.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.catalog.initialized()
    }

    /// The loaded catalog.
    ///
    /// # Errors
    /// Returns `Error::CatalogNotReady` while loading has not finished.
    pub fn get(&self) -> Result<&CatalogSearch> {
        self.catalog.get().ok_or(Error::CatalogNotReady)
    }

    /// Searches the catalog, failing fast while it is not ready.
    pub async fn search(&self, term: &str) -> Result<Vec<CatalogEntryModel>> {
        self.get()?.search(term).await
    }
}
