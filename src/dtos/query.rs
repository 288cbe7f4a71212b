//! Query DTOs - Parametri di paginazione e risposte paginate

use crate::core::Config;
use crate::repositories::{PageInfo, PageQuery};
use serde::ser::{Error as _, SerializeMap};
use serde::{Deserialize, Serialize, Serializer};

/// Query parameters di paginazione: `?page=2&page_size=10&query=rust&fields=id,name`
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
    #[serde(default)]
    pub query: Option<String>,
    /// Lista di campi separati da virgola
    #[serde(default)]
    pub fields: Option<String>,
}

impl PageParams {
    /// Page request for the repository, with the size clamped to
    /// `1..=max_page_size` and the text query matched against `search_fields`.
    pub fn to_page_query(&self, config: &Config, search_fields: &[&str]) -> PageQuery {
        let page_size = self
            .page_size
            .unwrap_or(config.default_page_size)
            .clamp(1, config.max_page_size);
        let page = PageQuery::new(self.page.unwrap_or(1), page_size);

        match self.query.as_deref() {
            Some(query) => page.with_query(query, search_fields.iter().copied()),
            None => page,
        }
    }

    /// Requested projection; empty means every column
    pub fn fields(&self) -> Vec<&str> {
        self.fields
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|field| !field.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Filtro sul thread per la lista dei commenti: `?parent_id=3`
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ThreadQuery {
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// Pagina di risultati con il relativo descrittore
#[derive(Serialize, Deserialize, Debug)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Paginated<Projected<T>> {
    /// Page of DTOs restricted to the requested `fields`
    pub fn projected<E>(rows: Vec<E>, page_info: PageInfo, fields: &[&str]) -> Self
    where
        T: From<E>,
    {
        Self {
            items: Projected::all(rows, fields),
            page_info,
        }
    }
}

/// DTO serializzato solo sulle colonne richieste con `?fields=`
///
/// Le colonne escluse dalla proiezione non vengono lette dal database, quindi
/// non compaiono nella risposta. `id` è sempre presente.
#[derive(Debug)]
pub struct Projected<T> {
    dto: T,
    fields: Vec<String>,
}

impl<T> Projected<T> {
    pub fn new(dto: impl Into<T>, fields: &[&str]) -> Self {
        Self {
            dto: dto.into(),
            fields: fields.iter().map(|field| field.to_string()).collect(),
        }
    }

    pub fn all<E>(rows: Vec<E>, fields: &[&str]) -> Vec<Self>
    where
        T: From<E>,
    {
        rows.into_iter().map(|row| Self::new(row, fields)).collect()
    }

    fn keeps(&self, key: &str) -> bool {
        key == "id" || self.fields.iter().any(|field| field == key)
    }
}

impl<T: Serialize> Serialize for Projected<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.fields.is_empty() {
            return self.dto.serialize(serializer);
        }

        match serde_json::to_value(&self.dto).map_err(S::Error::custom)? {
            serde_json::Value::Object(columns) => {
                let mut map = serializer.serialize_map(None)?;
                for (key, value) in columns.iter().filter(|(key, _)| self.keeps(key)) {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            other => other.serialize(serializer),
        }
    }
}

/// Risposta delle cancellazioni ricorsive
#[derive(Serialize, Deserialize, Debug)]
pub struct DeletedDTO {
    pub deleted: usize,
}
