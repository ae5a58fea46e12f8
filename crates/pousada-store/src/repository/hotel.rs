//! Loading and saving the whole [`Hotel`] state, one collection per key.

use std::sync::Arc;

use pousada_core::{
    Amenity, ClosedRoom, Collection, Hotel, HotelRoom, Package, PackageService, Product, Room,
    Theme,
};
use tracing::{debug, info, warn};

use super::Repository;
use crate::backend::KeyValueStore;
use crate::error::StoreResult;

/// Repository for every collection of the front desk state.
#[derive(Clone)]
pub struct HotelRepository {
    store: Arc<dyn KeyValueStore>,
    products: Repository<Vec<Product>>,
    amenities: Repository<Vec<Amenity>>,
    package_services: Repository<Vec<PackageService>>,
    packages: Repository<Vec<Package>>,
    inventory: Repository<Vec<HotelRoom>>,
    rooms: Repository<Vec<Room>>,
    closed_rooms: Repository<Vec<ClosedRoom>>,
    theme: Repository<Theme>,
}

impl HotelRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        HotelRepository {
            products: Repository::new(Arc::clone(&store), Collection::Products.key()),
            amenities: Repository::new(Arc::clone(&store), Collection::Amenities.key()),
            package_services: Repository::new(
                Arc::clone(&store),
                Collection::PackageServices.key(),
            ),
            packages: Repository::new(Arc::clone(&store), Collection::Packages.key()),
            inventory: Repository::new(Arc::clone(&store), Collection::Inventory.key()),
            rooms: Repository::new(Arc::clone(&store), Collection::Rooms.key()),
            closed_rooms: Repository::new(Arc::clone(&store), Collection::ClosedRooms.key()),
            theme: Repository::new(Arc::clone(&store), Collection::Theme.key()),
            store,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Loads every collection.
    ///
    /// Never fails: unreadable collections start empty. The built-in meal
    /// products are restored when missing, which marks `products` dirty so
    /// the next [`save_dirty`](Self::save_dirty) writes them back.
    pub async fn load(&self) -> Hotel {
        let mut hotel = Hotel::default();
        hotel.products = self.products.load().await;
        hotel.amenities = self.amenities.load().await;
        hotel.package_services = self.package_services.load().await;
        hotel.packages = self.packages.load().await;
        hotel.inventory = self.inventory.load().await;
        hotel.rooms = self.rooms.load().await;
        hotel.closed_rooms = self.closed_rooms.load().await;
        hotel.theme = self.theme.load().await;

        hotel.ensure_default_meals();

        info!(
            rooms = hotel.inventory.len(),
            active_stays = hotel.rooms.len(),
            history = hotel.closed_rooms.len(),
            "Hotel state loaded"
        );
        hotel
    }

    /// Replaces one collection with its current in-memory value.
    pub async fn save(&self, hotel: &Hotel, collection: Collection) -> StoreResult<()> {
        match collection {
            Collection::Products => self.products.save(&hotel.products).await,
            Collection::Amenities => self.amenities.save(&hotel.amenities).await,
            Collection::PackageServices => {
                self.package_services.save(&hotel.package_services).await
            }
            Collection::Packages => self.packages.save(&hotel.packages).await,
            Collection::Inventory => self.inventory.save(&hotel.inventory).await,
            Collection::Rooms => self.rooms.save(&hotel.rooms).await,
            Collection::ClosedRooms => self.closed_rooms.save(&hotel.closed_rooms).await,
            Collection::Theme => self.theme.save(&hotel.theme).await,
        }
    }

    /// Writes back every collection changed since the last save, in the
    /// order the hotel touched them.
    ///
    /// On failure the unsaved collections stay dirty so a later call retries
    /// them.
    pub async fn save_dirty(&self, hotel: &mut Hotel) -> StoreResult<Vec<Collection>> {
        let dirty = hotel.take_dirty();
        let mut saved = Vec::with_capacity(dirty.len());

        for (index, collection) in dirty.iter().copied().enumerate() {
            if let Err(e) = self.save(hotel, collection).await {
                warn!(key = collection.key(), error = %e, "Failed to persist collection");
                for pending in &dirty[index..] {
                    hotel.touch(*pending);
                }
                return Err(e);
            }
            saved.push(collection);
        }

        if !saved.is_empty() {
            debug!(count = saved.len(), "Persisted changed collections");
        }
        Ok(saved)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStore;
    use crate::error::StoreError;
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone, Utc};
    use pousada_core::{CheckInRequest, MealPlan, PaymentLedger, PaymentMethod};

    #[tokio::test]
    async fn test_empty_store_gets_default_meals() {
        let store = Arc::new(MemoryStore::new());
        let repo = HotelRepository::new(store.clone());

        let mut hotel = repo.load().await;
        assert_eq!(hotel.products.len(), 3);
        assert!(hotel.rooms.is_empty());
        assert_eq!(hotel.theme, Theme::Light);

        let saved = repo.save_dirty(&mut hotel).await.unwrap();
        assert_eq!(saved, vec![Collection::Products]);
        assert!(store.get("products").await.unwrap().is_some());
        assert!(store.get("rooms").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_collection_does_not_block_others() {
        let store = Arc::new(MemoryStore::with_values([
            ("rooms", "not json at all"),
            ("theme", "\"dark\""),
            (
                "inventory",
                r#"[{"id":"hroom_1","number":"101","name":"Quarto 101","amenities":[]}]"#,
            ),
        ]));
        let repo = HotelRepository::new(store);

        let hotel = repo.load().await;
        assert!(hotel.rooms.is_empty());
        assert_eq!(hotel.theme, Theme::Dark);
        assert_eq!(hotel.inventory.len(), 1);
        assert_eq!(hotel.inventory[0].number, "101");
    }

    #[tokio::test]
    async fn test_state_survives_reload() {
        let store = Arc::new(MemoryStore::new());
        let repo = HotelRepository::new(store.clone());

        let mut hotel = repo.load().await;
        hotel.add_inventory_room("102", "", vec![]).unwrap();
        hotel.add_product("Água", 3.5).unwrap();
        hotel.toggle_theme();
        repo.save_dirty(&mut hotel).await.unwrap();
        assert!(!hotel.is_dirty());

        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("\"dark\""));

        let reloaded = HotelRepository::new(store).load().await;
        assert_eq!(reloaded.inventory, hotel.inventory);
        assert_eq!(reloaded.products, hotel.products);
        assert_eq!(reloaded.theme, Theme::Dark);
        assert!(!reloaded.is_dirty());
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    #[async_trait]
    impl KeyValueStore for ReadOnlyStore {
        async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::QueryFailed("attempt to write a readonly database".into()))
        }

        async fn remove(&self, _key: &str) -> StoreResult<()> {
            Ok(())
        }

        async fn keys(&self) -> StoreResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_failed_save_keeps_collections_dirty() {
        let repo = HotelRepository::new(Arc::new(ReadOnlyStore));

        let mut hotel = repo.load().await;
        hotel.toggle_theme();

        assert!(repo.save_dirty(&mut hotel).await.is_err());
        assert_eq!(
            hotel.take_dirty(),
            vec![Collection::Products, Collection::Theme]
        );
    }

    /// Store that refuses writes to one key and passes everything else on.
    struct FailingKeyStore {
        inner: MemoryStore,
        failing_key: &'static str,
    }

    #[async_trait]
    impl KeyValueStore for FailingKeyStore {
        async fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            if key == self.failing_key {
                return Err(StoreError::QueryFailed("disk I/O error".into()));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> StoreResult<()> {
            self.inner.remove(key).await
        }

        async fn keys(&self) -> StoreResult<Vec<String>> {
            self.inner.keys().await
        }
    }

    #[tokio::test]
    async fn test_interrupted_checkout_keeps_the_stay() {
        let store = Arc::new(FailingKeyStore {
            inner: MemoryStore::new(),
            failing_key: "rooms",
        });
        let repo = HotelRepository::new(store.clone());

        let mut hotel = repo.load().await;
        hotel.add_inventory_room("101", "", vec![]).unwrap();
        repo.save_dirty(&mut hotel).await.unwrap();

        let room = hotel
            .check_in(CheckInRequest {
                room_number: "101".to_string(),
                guest_name: "Ana".to_string(),
                daily_rate: 100.0,
                check_in_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                check_out_date: None,
                meal_package: MealPlan::default(),
                package_id: None,
            })
            .unwrap();
        hotel.confirm_arrival(&room.id).unwrap();
        hotel.take_dirty();

        let at = Utc.with_ymd_and_hms(2024, 1, 3, 10, 0, 0).unwrap();
        let total = hotel.running_bill(&room.id, at).unwrap().total_amount;
        let mut ledger = PaymentLedger::new(total);
        ledger.add(PaymentMethod::Pix, total).unwrap();
        hotel.checkout(&room.id, &ledger, at).unwrap();

        assert!(repo.save_dirty(&mut hotel).await.is_err());

        // The record reached the store even though dropping the stay did not.
        let stored = store.get("closedRooms").await.unwrap().unwrap();
        assert!(stored.contains(&room.id));
        assert_eq!(hotel.take_dirty(), vec![Collection::Rooms]);
    }
}
