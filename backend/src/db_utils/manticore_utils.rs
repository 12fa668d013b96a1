use std::collections::BTreeMap;

use common::search_const::CATEGORY_IDS_FIELD;
use common::search_query::{AddedFilters, FieldCondition, FieldValue};
use common::search_result::{FacetBucket, FacetedData};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::api::search::search_sql::{build_facet_sql, facet_column};
use crate::config::FilterSettings;
use crate::db_utils::collection::{CollectionProvider, SearchResultProvider};

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSearchResult<T> {
    pub hits: RawSearchResultHits<T>,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default)]
    pub took: u64,
    pub aggregations: Option<BTreeMap<String, RawSearchResultAggregation>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSearchResultHits<T> {
    pub hits: Vec<RawSearchResultHit<T>>,
    pub total: u64,
    #[serde(default)]
    pub total_relation: String,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct RawSearchResultAggregation {
    pub buckets: Vec<RawSearchResultAggregationBucket>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawSearchResultAggregationBucket {
    pub key: serde_json::Value,
    pub doc_count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSearchResultHit<T> {
    #[serde(rename = "_source")]
    pub source: T,
    #[serde(rename = "_score", default)]
    pub score: u64,
}

pub fn manticore_search_sql<T: DeserializeOwned>(
    client: &reqwest::blocking::Client,
    base_url: &str,
    sql: String,
) -> anyhow::Result<RawSearchResult<T>> {
    let t0 = std::time::Instant::now();
    let database_url = format!("{}/sql", base_url.trim_end_matches('/'));
    let response = client.post(database_url).body(sql).send()?;
    let status = response.status();
    let response_txt = response.text()?;
    if status.is_client_error() || status.is_server_error() {
        anyhow::bail!("Error: {}: {}", status, response_txt);
    }
    let dt_ms = t0.elapsed().as_millis() as u64;
    tracing::debug!(len = response_txt.len(), dt_ms, "Manticore search response");
    let response: RawSearchResult<T> = serde_json::from_str(&response_txt)?;
    Ok(response)
}

/// Reads the buckets of one facet column into category-keyed counts.
pub fn facet_buckets_to_faceted_data<T>(
    response: &RawSearchResult<T>,
    column: &str,
) -> anyhow::Result<FacetedData> {
    let default = RawSearchResultAggregation::default();
    let buckets = response
        .aggregations
        .as_ref()
        .and_then(|aggregations| aggregations.get(column))
        .unwrap_or(&default);

    let mut result = FacetedData::new();
    for bucket in &buckets.buckets {
        let key = match &bucket.key {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.parse::<u64>().ok(),
            _ => None,
        };
        let Some(key) = key else {
            anyhow::bail!("Invalid value from manticore related to facets: {:#?}", bucket.key);
        };
        result.insert(key, FacetBucket::with_count(bucket.doc_count));
    }
    Ok(result)
}


/// Product collection backed by a Manticore table.
#[derive(Debug, Clone)]
pub struct ManticoreCollection {
    client: reqwest::blocking::Client,
    settings: FilterSettings,
    filters: AddedFilters,
}

impl ManticoreCollection {
    pub fn new(client: reqwest::blocking::Client, settings: FilterSettings) -> Self {
        ManticoreCollection {
            client,
            settings,
            filters: AddedFilters::new(),
        }
    }
}

impl SearchResultProvider for ManticoreCollection {
    fn add_field_to_filter(&mut self, field: &str, condition: FieldCondition) {
        self.filters.insert(field.to_string(), condition);
    }

    fn added_filters(&self) -> &AddedFilters {
        &self.filters
    }

    fn faceted_data(&self, field: &str) -> anyhow::Result<FacetedData> {
        let column = facet_column(field);
        let sql = build_facet_sql(&self.settings.manticore_table, &self.filters, column, self.settings.facet_limit);
        tracing::trace!(%sql, "Running facet query");
        let response = manticore_search_sql::<serde_json::Value>(&self.client, &self.settings.manticore_url, sql)?;
        facet_buckets_to_faceted_data(&response, column)
    }
}


#[derive(Debug, Clone)]
pub struct ManticoreCollectionProvider {
    client: reqwest::blocking::Client,
    settings: FilterSettings,
}

impl ManticoreCollectionProvider {
    pub fn new(settings: FilterSettings) -> Self {
        ManticoreCollectionProvider {
            client: reqwest::blocking::Client::new(),
            settings,
        }
    }

    pub fn collection(&self) -> ManticoreCollection {
        ManticoreCollection::new(self.client.clone(), self.settings.clone())
    }
}

impl CollectionProvider for ManticoreCollectionProvider {
    type Collection = ManticoreCollection;

    fn collection_for_category(&self, category_id: u64) -> anyhow::Result<ManticoreCollection> {
        let mut collection = self.collection();
        collection.add_field_to_filter(CATEGORY_IDS_FIELD, FieldCondition::Eq(FieldValue::Int(category_id)));
        Ok(collection)
    }
}
