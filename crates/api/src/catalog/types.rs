//! Domain types for the upstream product catalog API.
//!
//! Upstream payloads are matched case-insensitively: the API serves
//! lowercase field names, but serde aliases accept the PascalCase spellings
//! some deployments use.

use cartwheel_core::{CategoryId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Product from the upstream catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    #[serde(alias = "Id")]
    pub id: ProductId,
    /// Product name or title.
    #[serde(default, alias = "Title")]
    pub title: String,
    /// URL-friendly slug for the product.
    #[serde(default, alias = "Slug")]
    pub slug: String,
    /// Product price.
    #[serde(alias = "Price")]
    pub price: Decimal,
    /// Detailed product description.
    #[serde(default, alias = "Description")]
    pub description: String,
    /// Primary product image, when the upstream sends one directly.
    #[serde(default, alias = "Image")]
    pub image: Option<String>,
    /// List of product images.
    #[serde(default, alias = "Images")]
    pub images: Vec<String>,
    /// Product category.
    #[serde(default, alias = "Category")]
    pub category: Option<Category>,
}

impl Product {
    /// The primary image: the dedicated `image` field when present,
    /// otherwise the first entry of `images`.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.image
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
    }
}

/// Product category from the upstream catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier.
    #[serde(alias = "Id")]
    pub id: CategoryId,
    /// Category name.
    #[serde(default, alias = "Name")]
    pub name: String,
    /// URL-friendly category slug.
    #[serde(default, alias = "Slug")]
    pub slug: String,
    /// Category image URL.
    #[serde(default, alias = "Image")]
    pub image: String,
}

/// Search filters forwarded to the upstream catalog.
///
/// Every field is optional; an empty filter set lists all products. Field
/// names mirror the upstream query parameters (`title`, `categoryId`,
/// `price_min`, `price_max`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductFilters {
    /// Partial title match.
    #[serde(default)]
    pub title: Option<String>,
    /// Restrict to a category.
    #[serde(default, rename = "categoryId")]
    pub category_id: Option<CategoryId>,
    /// Minimum price, inclusive.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub price_min: Option<Decimal>,
    /// Maximum price, inclusive.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub price_max: Option<Decimal>,
}

impl ProductFilters {
    /// Render the set filters as upstream query parameters.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(title) = self.title.as_deref().filter(|t| !t.trim().is_empty()) {
            pairs.push(("title", title.to_string()));
        }
        if let Some(category_id) = self.category_id {
            pairs.push(("categoryId", category_id.to_string()));
        }
        if let Some(price_min) = self.price_min {
            pairs.push(("price_min", price_min.to_string()));
        }
        if let Some(price_max) = self.price_max {
            pairs.push(("price_max", price_max.to_string()));
        }

        pairs
    }
}

/// Deserialize empty strings as None for optional numeric fields.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_decodes_lowercase_fields() {
        let json = r#"{
            "id": 1,
            "title": "Classic Red Pullover Hoodie",
            "slug": "classic-red-pullover-hoodie",
            "price": 10,
            "description": "A hoodie.",
            "category": {
                "id": 1,
                "name": "Clothes",
                "slug": "clothes",
                "image": "https://i.imgur.com/QkIa5tT.jpeg"
            },
            "images": ["https://i.imgur.com/1twoaDy.jpeg"]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_i32(), 1);
        assert_eq!(product.title, "Classic Red Pullover Hoodie");
        assert_eq!(product.price, Decimal::from(10));
        assert_eq!(product.category.as_ref().unwrap().name, "Clothes");
    }

    #[test]
    fn test_product_decodes_pascal_case_fields() {
        let json = r#"{
            "Id": 2,
            "Title": "Mug",
            "Price": "4.50",
            "Images": ["https://img.example.com/mug.jpg"]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_i32(), 2);
        assert_eq!(product.title, "Mug");
        assert_eq!(product.price, "4.50".parse::<Decimal>().unwrap());
        assert!(product.category.is_none());
    }

    #[test]
    fn test_product_missing_optional_fields_default() {
        let product: Product = serde_json::from_str(r#"{"id": 3, "price": 1}"#).unwrap();
        assert!(product.title.is_empty());
        assert!(product.images.is_empty());
        assert!(product.image.is_none());
        assert!(product.primary_image().is_none());
    }

    #[test]
    fn test_primary_image_prefers_dedicated_field() {
        let json = r#"{
            "id": 4,
            "price": 1,
            "image": "https://img.example.com/main.jpg",
            "images": ["https://img.example.com/first.jpg"]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(
            product.primary_image(),
            Some("https://img.example.com/main.jpg")
        );
    }

    #[test]
    fn test_primary_image_falls_back_to_images_list() {
        let json = r#"{"id": 5, "price": 1, "images": ["https://img.example.com/a.jpg"]}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.primary_image(), Some("https://img.example.com/a.jpg"));
    }

    #[test]
    fn test_filters_query_pairs_empty() {
        assert!(ProductFilters::default().query_pairs().is_empty());
    }

    #[test]
    fn test_filters_query_pairs_full() {
        let filters = ProductFilters {
            title: Some("shirt".to_string()),
            category_id: Some(CategoryId::new(1)),
            price_min: Some(Decimal::from(67)),
            price_max: Some(Decimal::from(2137)),
        };

        assert_eq!(
            filters.query_pairs(),
            vec![
                ("title", "shirt".to_string()),
                ("categoryId", "1".to_string()),
                ("price_min", "67".to_string()),
                ("price_max", "2137".to_string()),
            ]
        );
    }

    #[test]
    fn test_filters_blank_title_skipped() {
        let filters = ProductFilters {
            title: Some("   ".to_string()),
            ..ProductFilters::default()
        };
        assert!(filters.query_pairs().is_empty());
    }

    #[test]
    fn test_filters_deserialize_empty_price_as_none() {
        let filters: ProductFilters =
            serde_urlencoded_like(r#"{"title": "mug", "price_min": "", "price_max": "25"}"#);
        assert_eq!(filters.title.as_deref(), Some("mug"));
        assert!(filters.price_min.is_none());
        assert_eq!(filters.price_max, Some(Decimal::from(25)));
    }

    fn serde_urlencoded_like(json: &str) -> ProductFilters {
        serde_json::from_str(json).unwrap()
    }
}
