//! SQL builder helpers for collection filters.

use common::search_const::{CATEGORY_FACET_FIELD, CATEGORY_IDS_FIELD};
use common::search_query::{AddedFilters, FieldCondition, FieldValue};


/// Table column aggregated for a facet field.
pub fn facet_column(field: &str) -> &str {
    if field == CATEGORY_FACET_FIELD {
        CATEGORY_IDS_FIELD
    } else {
        field
    }
}

fn sql_value(value: &FieldValue) -> String {
    match value {
        FieldValue::String(s) => format_sql_query::QuotedData(s).to_string(),
        FieldValue::Int(i) => i.to_string(),
    }
}

pub fn build_sql_where_clause(filters: &AddedFilters) -> String {
    if filters.is_empty() {
        return String::new();
    }

    let mut terms = Vec::new();
    for (field_name, condition) in filters.iter() {
        let values = match condition {
            FieldCondition::Eq(value) => vec![value],
            FieldCondition::In(values) => values.iter().collect(),
        };
        if values.is_empty() {
            // document ids start at 1, so this never matches
            terms.push("id = 0".to_string());
            continue;
        }
        let values_str = values.into_iter().map(sql_value).collect::<Vec<String>>().join(", ");
        terms.push(format!(
            "{field_name} IN ({values_str})",
        ));
    }

    format!("
        WHERE {}", terms.join("
        AND "))
}

pub fn build_facet_sql(table: &str, filters: &AddedFilters, column: &str, limit: u64) -> String {
    let sql_where_clause = build_sql_where_clause(filters);
    format!(
        "
        SELECT id
        FROM {table}
        {sql_where_clause}
        LIMIT 0

        FACET {column} ORDER BY COUNT(*) DESC LIMIT {limit}
        ;",
    )
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_render_no_where_clause() {
        assert_eq!(build_sql_where_clause(&AddedFilters::new()), "");
    }

    #[test]
    fn renders_conditions_with_quoted_strings() {
        let mut filters = AddedFilters::new();
        filters.insert("category_ids".to_string(), FieldCondition::In(vec![3u64.into(), 7u64.into()]));
        filters.insert("brand".to_string(), FieldCondition::Eq("o'neill".into()));
        let clause = build_sql_where_clause(&filters);
        assert!(clause.contains("WHERE brand IN ('o"));
        assert!(clause.contains("AND category_ids IN (3, 7)"));
    }

    #[test]
    fn empty_in_list_matches_nothing() {
        let mut filters = AddedFilters::new();
        filters.insert("category_ids".to_string(), FieldCondition::In(vec![]));
        assert!(build_sql_where_clause(&filters).contains("id = 0"));
    }

    #[test]
    fn facet_query_targets_category_column() {
        let mut filters = AddedFilters::new();
        filters.insert("category_ids".to_string(), FieldCondition::Eq(12u64.into()));
        let sql = build_facet_sql("catalog_products", &filters, facet_column("category"), 1000);
        assert!(sql.contains("FROM catalog_products"));
        assert!(sql.contains("category_ids IN (12)"));
        assert!(sql.contains("FACET category_ids ORDER BY COUNT(*) DESC LIMIT 1000"));
    }
}
