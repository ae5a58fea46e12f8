//! # Catalog Commands
//!
//! Products, amenities, package services and packages.

use pousada_core::{Amenity, Hotel, Money, Package, PackageDraft, PackageService, Product};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::FrontDesk;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    /// Built-in meal product; cannot be removed.
    pub protected: bool,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        ProductResponse {
            id: product.id.clone(),
            name: product.name.clone(),
            price_cents: product.price().cents(),
            protected: product.is_reserved_meal(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageResponse {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub description: String,
    pub service_ids: Vec<String>,
    /// Names of the services that still exist.
    pub service_names: Vec<String>,
}

pub(crate) fn package_response(hotel: &Hotel, package: &Package) -> PackageResponse {
    PackageResponse {
        id: package.id.clone(),
        name: package.name.clone(),
        price_cents: Money::from_decimal(package.price).cents(),
        description: package.description.clone(),
        service_ids: package.service_ids.clone(),
        service_names: hotel.package_service_names(package),
    }
}

// =============================================================================
// Products
// =============================================================================

pub fn list_products(desk: &FrontDesk) -> Vec<ProductResponse> {
    desk.hotel().products.iter().map(ProductResponse::from).collect()
}

pub fn add_product(desk: &mut FrontDesk, name: &str, price: f64) -> Result<ProductResponse, ApiError> {
    let product = desk.hotel.add_product(name, price)?;
    Ok(ProductResponse::from(&product))
}

pub fn update_product(
    desk: &mut FrontDesk,
    product_id: &str,
    name: &str,
    price: f64,
) -> Result<ProductResponse, ApiError> {
    let product = desk.hotel.update_product(product_id, name, price)?;
    Ok(ProductResponse::from(&product))
}

pub fn remove_product(desk: &mut FrontDesk, product_id: &str) -> Result<(), ApiError> {
    debug!(product_id = %product_id, "remove_product command");
    Ok(desk.hotel.remove_product(product_id)?)
}

// =============================================================================
// Amenities & Package Services
// =============================================================================

pub fn list_amenities(desk: &FrontDesk) -> Vec<Amenity> {
    desk.hotel().amenities.clone()
}

pub fn add_amenity(desk: &mut FrontDesk, name: &str) -> Result<Amenity, ApiError> {
    Ok(desk.hotel.add_amenity(name)?)
}

pub fn remove_amenity(desk: &mut FrontDesk, amenity_id: &str) -> Result<(), ApiError> {
    Ok(desk.hotel.remove_amenity(amenity_id)?)
}

pub fn list_package_services(desk: &FrontDesk) -> Vec<PackageService> {
    desk.hotel().package_services.clone()
}

pub fn add_package_service(desk: &mut FrontDesk, name: &str) -> Result<PackageService, ApiError> {
    Ok(desk.hotel.add_package_service(name)?)
}

pub fn remove_package_service(desk: &mut FrontDesk, service_id: &str) -> Result<(), ApiError> {
    Ok(desk.hotel.remove_package_service(service_id)?)
}

// =============================================================================
// Packages
// =============================================================================

pub fn list_packages(desk: &FrontDesk) -> Vec<PackageResponse> {
    let hotel = desk.hotel();
    hotel
        .packages
        .iter()
        .map(|package| package_response(hotel, package))
        .collect()
}

pub fn add_package(desk: &mut FrontDesk, draft: PackageDraft) -> Result<PackageResponse, ApiError> {
    let package = desk.hotel.add_package(draft)?;
    Ok(package_response(desk.hotel(), &package))
}

pub fn update_package(
    desk: &mut FrontDesk,
    package_id: &str,
    draft: PackageDraft,
) -> Result<PackageResponse, ApiError> {
    let package = desk.hotel.update_package(package_id, draft)?;
    Ok(package_response(desk.hotel(), &package))
}

pub fn remove_package(desk: &mut FrontDesk, package_id: &str) -> Result<(), ApiError> {
    Ok(desk.hotel.remove_package(package_id)?)
}
