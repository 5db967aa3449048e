//! Property queries, including the filtered property search.

use sqlx::{Postgres, QueryBuilder};
use tracing::{debug, info};

use crate::db::{DatabasePool, Property, PropertyListing, check_limit};
use crate::error::{DbError, query_failed};
use crate::models::{NewProperty, PropertySearch};

const PROPERTY_SEARCH_SELECT: &str = "SELECT properties.*, \
     avg(property_reviews.rating)::float8 AS average_rating \
     FROM properties \
     LEFT JOIN property_reviews ON properties.id = property_reviews.property_id";

/// Opens the WHERE clause on the first predicate and chains the rest with AND.
fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, has_where: &mut bool) {
    builder.push(if *has_where { " AND " } else { " WHERE " });
    *has_where = true;
}

/// Builds the property search query for `search`, capped at `limit` rows.
pub(crate) fn property_search_query(
    search: &PropertySearch,
    limit: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(PROPERTY_SEARCH_SELECT);
    let mut has_where = false;

    if let Some(city) = &search.city {
        push_predicate(&mut builder, &mut has_where);
        builder.push("properties.city LIKE ");
        builder.push_bind(format!("%{}%", city));
    }

    if let Some(owner_id) = search.owner_id {
        push_predicate(&mut builder, &mut has_where);
        builder.push("properties.owner_id = ");
        builder.push_bind(owner_id);
    }

    if let Some(min_cents) = search.minimum_price_cents() {
        push_predicate(&mut builder, &mut has_where);
        builder.push("properties.cost_per_night >= ");
        builder.push_bind(min_cents);
    }

    if let Some(max_cents) = search.maximum_price_cents() {
        push_predicate(&mut builder, &mut has_where);
        builder.push("properties.cost_per_night <= ");
        builder.push_bind(max_cents);
    }

    builder.push(" GROUP BY properties.id");

    // Rating is a per-property aggregate, so it filters groups, not rows.
    if let Some(rating) = search.minimum_rating {
        builder.push(" HAVING avg(property_reviews.rating)::float8 >= ");
        builder.push_bind(rating);
    }

    builder.push(" ORDER BY properties.cost_per_night ASC LIMIT ");
    builder.push_bind(limit);

    builder
}

impl DatabasePool {
    /// Gets properties matching `search`, cheapest first.
    ///
    /// # Arguments
    /// * `search` - Optional city, owner, price range and rating filters
    /// * `limit` - Maximum number of rows to return
    ///
    /// # Errors
    /// Returns [`DbError::InvalidRequest`] for a negative limit or an
    /// inverted price range, or a database error if the query fails.
    pub async fn get_all_properties(
        &self,
        search: &PropertySearch,
        limit: i64,
    ) -> Result<Vec<PropertyListing>, DbError> {
        check_limit(limit)?;
        search.validate()?;

        let mut builder = property_search_query(search, limit);
        debug!(sql = builder.sql(), ?search, limit, "searching properties");

        let listings = builder
            .build_query_as::<PropertyListing>()
            .fetch_all(self.pool())
            .await
            .map_err(query_failed("get_all_properties"))?;

        debug!(count = listings.len(), "property search complete");
        Ok(listings)
    }

    /// Adds a property and returns the stored row.
    ///
    /// # Errors
    /// Returns [`DbError::InvalidRequest`] for negative amounts or an unknown
    /// owner, or a database error if the insert fails.
    pub async fn add_property(&self, property: &NewProperty) -> Result<Property, DbError> {
        property.validate()?;

        let created = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (owner_id, title, description, thumbnail_photo_url,
                cover_photo_url, cost_per_night, street, city, province, post_code,
                country, parking_spaces, number_of_bathrooms, number_of_bedrooms)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(property.owner_id)
        .bind(&property.title)
        .bind(&property.description)
        .bind(&property.thumbnail_photo_url)
        .bind(&property.cover_photo_url)
        .bind(property.cost_per_night)
        .bind(&property.street)
        .bind(&property.city)
        .bind(&property.province)
        .bind(&property.post_code)
        .bind(&property.country)
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .fetch_one(self.pool())
        .await
        .map_err(query_failed("add_property"))?;

        info!(
            property_id = created.id,
            owner_id = created.owner_id,
            "property created"
        );
        Ok(created)
    }
}
