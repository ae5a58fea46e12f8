//! # Catalog
//!
//! Products, amenities, package services and packages.
//!
//! ## Reserved Meal Products
//! ```text
//! meal_breakfast  "Café da Manhã (Diária)"  30.00
//! meal_lunch      "Almoço (Diária)"         50.00
//! meal_dinner     "Jantar (Diária)"         45.00
//! ```
//! They are re-created whenever the catalog loads without them and cannot be
//! deleted. Their price is the daily rate of the matching meal plan flag.

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};
use crate::hotel::{Collection, Hotel};
use crate::types::{new_id, Amenity, Meal, Package, PackageService, Product};
use crate::validation::{
    ensure_unique_name, validate_name, validate_non_negative_price, validate_positive_price,
};

/// Form data for creating or updating a package.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDraft {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub service_ids: Vec<String>,
}

impl Hotel {
    // =========================================================================
    // Products
    // =========================================================================

    /// Appends any reserved meal product missing from the catalog.
    ///
    /// Returns true when something was added.
    pub fn ensure_default_meals(&mut self) -> bool {
        let missing: Vec<Product> = Meal::ALL
            .iter()
            .filter(|meal| !self.products.iter().any(|p| p.id == meal.product_id()))
            .map(|meal| meal.default_product())
            .collect();

        if missing.is_empty() {
            return false;
        }

        info!(count = missing.len(), "Restoring default meal products");
        self.products.extend(missing);
        self.touch(Collection::Products);
        true
    }

    pub fn add_product(&mut self, name: &str, price: f64) -> CoreResult<Product> {
        let name = validate_name("product name", name)?;
        validate_positive_price("price", price)?;
        ensure_unique_name("product", &name, self.products.iter().map(|p| p.name.as_str()))?;

        let product = Product {
            id: new_id("prod"),
            name,
            price,
        };

        debug!(id = %product.id, name = %product.name, "Product created");
        self.products.push(product.clone());
        self.touch(Collection::Products);
        Ok(product)
    }

    /// Renames or reprices a product.
    ///
    /// Existing order lines keep the price they were added with; meal plans
    /// pick the new price up on their next bill.
    pub fn update_product(&mut self, product_id: &str, name: &str, price: f64) -> CoreResult<Product> {
        let name = validate_name("product name", name)?;
        validate_positive_price("price", price)?;
        ensure_unique_name(
            "product",
            &name,
            self.products
                .iter()
                .filter(|p| p.id != product_id)
                .map(|p| p.name.as_str()),
        )?;

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        product.name = name;
        product.price = price;
        let updated = product.clone();

        self.touch(Collection::Products);
        Ok(updated)
    }

    pub fn remove_product(&mut self, product_id: &str) -> CoreResult<()> {
        if Meal::from_product_id(product_id).is_some() {
            return Err(CoreError::ProtectedProduct(product_id.to_string()));
        }

        let before = self.products.len();
        self.products.retain(|p| p.id != product_id);
        if self.products.len() == before {
            return Err(CoreError::ProductNotFound(product_id.to_string()));
        }

        self.touch(Collection::Products);
        Ok(())
    }

    // =========================================================================
    // Amenities & Package Services
    // =========================================================================

    pub fn add_amenity(&mut self, name: &str) -> CoreResult<Amenity> {
        let name = validate_name("amenity name", name)?;
        ensure_unique_name("amenity", &name, self.amenities.iter().map(|a| a.name.as_str()))?;

        let amenity = Amenity {
            id: new_id("amenity"),
            name,
        };
        self.amenities.push(amenity.clone());
        self.touch(Collection::Amenities);
        Ok(amenity)
    }

    /// Removes an amenity from the catalog. Rooms that list it keep the name.
    pub fn remove_amenity(&mut self, amenity_id: &str) -> CoreResult<()> {
        let before = self.amenities.len();
        self.amenities.retain(|a| a.id != amenity_id);
        if self.amenities.len() == before {
            return Err(CoreError::AmenityNotFound(amenity_id.to_string()));
        }

        self.touch(Collection::Amenities);
        Ok(())
    }

    pub fn add_package_service(&mut self, name: &str) -> CoreResult<PackageService> {
        let name = validate_name("service name", name)?;
        ensure_unique_name(
            "service",
            &name,
            self.package_services.iter().map(|s| s.name.as_str()),
        )?;

        let service = PackageService {
            id: new_id("ps"),
            name,
        };
        self.package_services.push(service.clone());
        self.touch(Collection::PackageServices);
        Ok(service)
    }

    pub fn remove_package_service(&mut self, service_id: &str) -> CoreResult<()> {
        let before = self.package_services.len();
        self.package_services.retain(|s| s.id != service_id);
        if self.package_services.len() == before {
            return Err(CoreError::PackageServiceNotFound(service_id.to_string()));
        }

        self.touch(Collection::PackageServices);
        Ok(())
    }

    /// Service names of a package, skipping ids no longer in the catalog.
    pub fn package_service_names(&self, package: &Package) -> Vec<String> {
        package
            .service_ids
            .iter()
            .filter_map(|id| self.package_services.iter().find(|s| &s.id == id))
            .map(|s| s.name.clone())
            .collect()
    }

    // =========================================================================
    // Packages
    // =========================================================================

    pub fn add_package(&mut self, draft: PackageDraft) -> CoreResult<Package> {
        let name = validate_name("package name", &draft.name)?;
        validate_non_negative_price("price", draft.price)?;
        ensure_unique_name("package", &name, self.packages.iter().map(|p| p.name.as_str()))?;

        let package = Package {
            id: new_id("pkg"),
            name,
            price: draft.price,
            description: draft.description.trim().to_string(),
            service_ids: draft.service_ids,
        };

        info!(id = %package.id, name = %package.name, "Package created");
        self.packages.push(package.clone());
        self.touch(Collection::Packages);
        Ok(package)
    }

    /// Replaces a package's fields. Stays that already selected it keep the
    /// name and price they were checked in with.
    pub fn update_package(&mut self, package_id: &str, draft: PackageDraft) -> CoreResult<Package> {
        let name = validate_name("package name", &draft.name)?;
        validate_non_negative_price("price", draft.price)?;
        ensure_unique_name(
            "package",
            &name,
            self.packages
                .iter()
                .filter(|p| p.id != package_id)
                .map(|p| p.name.as_str()),
        )?;

        let package = self
            .packages
            .iter_mut()
            .find(|p| p.id == package_id)
            .ok_or_else(|| CoreError::PackageNotFound(package_id.to_string()))?;

        package.name = name;
        package.price = draft.price;
        package.description = draft.description.trim().to_string();
        package.service_ids = draft.service_ids;
        let updated = package.clone();

        self.touch(Collection::Packages);
        Ok(updated)
    }

    pub fn remove_package(&mut self, package_id: &str) -> CoreResult<()> {
        let before = self.packages.len();
        self.packages.retain(|p| p.id != package_id);
        if self.packages.len() == before {
            return Err(CoreError::PackageNotFound(package_id.to_string()));
        }

        self.touch(Collection::Packages);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn draft(name: &str, price: f64) -> PackageDraft {
        PackageDraft {
            name: name.to_string(),
            price,
            description: "  Flores e espumante ".to_string(),
            service_ids: vec![],
        }
    }

    #[test]
    fn test_default_meals_restored_once() {
        let mut hotel = Hotel::new();
        assert!(hotel.ensure_default_meals());
        assert_eq!(hotel.products.len(), 3);
        assert_eq!(hotel.product("meal_lunch").unwrap().price, 50.0);
        assert_eq!(hotel.take_dirty(), vec![Collection::Products]);

        assert!(!hotel.ensure_default_meals());
        assert!(!hotel.is_dirty());
    }

    #[test]
    fn test_default_meals_keep_custom_prices() {
        let mut hotel = Hotel::new();
        hotel.products.push(Product {
            id: "meal_breakfast".to_string(),
            name: "Café".to_string(),
            price: 35.0,
        });

        hotel.ensure_default_meals();
        assert_eq!(hotel.products.len(), 3);
        assert_eq!(hotel.product("meal_breakfast").unwrap().price, 35.0);
    }

    #[test]
    fn test_add_product_validation() {
        let mut hotel = Hotel::new();
        let water = hotel.add_product(" Água ", 4.5).unwrap();
        assert_eq!(water.name, "Água");
        assert!(water.id.starts_with("prod_"));

        assert!(matches!(
            hotel.add_product("água", 5.0),
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
        assert!(hotel.add_product("Suco", 0.0).is_err());
        assert!(hotel.add_product("", 3.0).is_err());
        assert_eq!(hotel.products.len(), 1);
    }

    #[test]
    fn test_meal_products_are_protected() {
        let mut hotel = Hotel::new();
        hotel.ensure_default_meals();
        assert!(matches!(
            hotel.remove_product("meal_dinner"),
            Err(CoreError::ProtectedProduct(_))
        ));

        let soda = hotel.add_product("Refrigerante", 6.0).unwrap();
        hotel.remove_product(&soda.id).unwrap();
        assert_eq!(hotel.products.len(), 3);
    }

    #[test]
    fn test_update_product_checks_other_names() {
        let mut hotel = Hotel::new();
        let water = hotel.add_product("Água", 4.5).unwrap();
        hotel.add_product("Suco", 8.0).unwrap();

        let renamed = hotel.update_product(&water.id, "ÁGUA", 5.0).unwrap();
        assert_eq!(renamed.price, 5.0);
        assert!(hotel.update_product(&water.id, "suco", 5.0).is_err());
    }

    #[test]
    fn test_amenities_and_services() {
        let mut hotel = Hotel::new();
        let wifi = hotel.add_amenity("Wi-Fi").unwrap();
        assert!(hotel.add_amenity("WI-FI").is_err());
        hotel.remove_amenity(&wifi.id).unwrap();
        assert!(matches!(
            hotel.remove_amenity(&wifi.id),
            Err(CoreError::AmenityNotFound(_))
        ));

        let spa = hotel.add_package_service("Spa").unwrap();
        assert!(spa.id.starts_with("ps_"));
        assert!(hotel.add_package_service(" spa ").is_err());
    }

    #[test]
    fn test_package_create_update_delete() {
        let mut hotel = Hotel::new();
        let spa = hotel.add_package_service("Spa").unwrap();
        let mut romantic = draft("Romântico", 250.0);
        romantic.service_ids = vec![spa.id.clone(), "ps_gone".to_string()];

        let created = hotel.add_package(romantic).unwrap();
        assert_eq!(created.description, "Flores e espumante");
        assert_eq!(hotel.package_service_names(&created), vec!["Spa".to_string()]);

        hotel.add_package(draft("Família", 0.0)).unwrap();
        assert!(hotel.add_package(draft("romântico", 10.0)).is_err());
        assert!(hotel.add_package(draft("Negativo", -1.0)).is_err());

        // Keeping its own name is fine, taking another package's is not.
        let updated = hotel.update_package(&created.id, draft("Romântico", 300.0)).unwrap();
        assert_eq!(updated.price, 300.0);
        assert!(updated.service_ids.is_empty());
        assert!(hotel.update_package(&created.id, draft("FAMÍLIA", 300.0)).is_err());

        hotel.remove_package(&created.id).unwrap();
        assert!(matches!(
            hotel.remove_package(&created.id),
            Err(CoreError::PackageNotFound(_))
        ));
    }
}
