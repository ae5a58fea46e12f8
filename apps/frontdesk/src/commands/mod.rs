//! # Commands Module
//!
//! Every front desk operation, decoded from one JSON line.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (Command enum, dispatch)
//! ├── view.rs       ◄─── Navigation, theme
//! ├── catalog.rs    ◄─── Products, amenities, services, packages
//! ├── inventory.rs  ◄─── Physical rooms, room board
//! ├── stay.rs       ◄─── Check-in, arrival, cancellation, orders, edits
//! ├── checkout.rs   ◄─── Payments and checkout confirmation
//! ├── history.rs    ◄─── Closed stays, reopen, clear
//! └── quote.rs      ◄─── Stay simulator
//! ```
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin  {"command":"add_to_order",                                      │
//! │          "args":{"roomId":"room_…","productId":"meal_lunch"}}           │
//! │            │                                                            │
//! │            ▼                                                            │
//! │  Command::AddToOrder { room_id, product_id, confirm_duplicate: false }  │
//! │            │                                                            │
//! │            ▼  dispatch → stay::add_to_order → desk.persist()            │
//! │                                                                         │
//! │  stdout {"ok":true,"data":{"status":"needsConfirmation",…},             │
//! │          "screen":{"screen":"roomDetail","roomId":"room_…"}}            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod checkout;
pub mod history;
pub mod inventory;
pub mod quote;
pub mod stay;
pub mod view;

use pousada_core::{
    CancellationRequest, CheckInRequest, Destination, PackageDraft, PaymentMethod, RoomFilter,
    Screen, StayEdit,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::FrontDesk;
use checkout::AmountInput;
use quote::QuoteRequest;

/// One front desk command.
#[derive(Debug, Clone, Deserialize)]
#[serde(
    tag = "command",
    content = "args",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum Command {
    // View
    GetView,
    Navigate { destination: Destination },
    FilterBoard { filter: RoomFilter },
    ToggleTheme,

    // Catalog
    ListProducts,
    AddProduct { name: String, price: f64 },
    UpdateProduct { product_id: String, name: String, price: f64 },
    RemoveProduct { product_id: String },
    ListAmenities,
    AddAmenity { name: String },
    RemoveAmenity { amenity_id: String },
    ListPackageServices,
    AddPackageService { name: String },
    RemovePackageService { service_id: String },
    ListPackages,
    AddPackage(PackageDraft),
    UpdatePackage { package_id: String, package: PackageDraft },
    RemovePackage { package_id: String },

    // Inventory
    ListInventory,
    AddInventoryRoom {
        number: String,
        #[serde(default)]
        name: String,
        #[serde(default)]
        amenities: Vec<String>,
    },
    RemoveInventoryRoom { number: String },
    RoomBoard {
        #[serde(default)]
        filter: RoomFilter,
    },

    // Stays
    StartCheckIn { room_number: String },
    CheckIn(CheckInRequest),
    SelectRoom { room_id: String },
    ConfirmArrival { room_id: String },
    RequestCancellation { room_id: String },
    ConfirmCancellation(CancellationRequest),
    AddToOrder {
        room_id: String,
        product_id: String,
        #[serde(default)]
        confirm_duplicate: bool,
    },
    ChangeQuantity { room_id: String, product_id: String, delta: i64 },
    EditStay { room_id: String, edit: StayEdit },

    // Checkout
    OpenCheckout { room_id: String },
    AddPayment { method: PaymentMethod, amount: AmountInput },
    RemovePayment { payment_id: String },
    SetSplit { count: Option<u32> },
    ConfirmCheckout,
    CancelCheckout,

    // History
    ListHistory {
        #[serde(default)]
        term: String,
    },
    Reopen { record_id: String },
    ClearHistory {
        #[serde(default)]
        confirm: bool,
    },

    // Simulator
    Quote(QuoteRequest),
}

/// One stdout line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    /// Screen after the command ran.
    pub screen: Screen,
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

fn route(desk: &mut FrontDesk, command: Command) -> Result<Value, ApiError> {
    match command {
        Command::GetView => to_json(view::get_view(desk)),
        Command::Navigate { destination } => to_json(view::navigate(desk, destination)),
        Command::FilterBoard { filter } => to_json(view::filter_board(desk, filter)),
        Command::ToggleTheme => to_json(view::toggle_theme(desk)),

        Command::ListProducts => to_json(catalog::list_products(desk)),
        Command::AddProduct { name, price } => to_json(catalog::add_product(desk, &name, price)?),
        Command::UpdateProduct {
            product_id,
            name,
            price,
        } => to_json(catalog::update_product(desk, &product_id, &name, price)?),
        Command::RemoveProduct { product_id } => to_json(catalog::remove_product(desk, &product_id)?),
        Command::ListAmenities => to_json(catalog::list_amenities(desk)),
        Command::AddAmenity { name } => to_json(catalog::add_amenity(desk, &name)?),
        Command::RemoveAmenity { amenity_id } => to_json(catalog::remove_amenity(desk, &amenity_id)?),
        Command::ListPackageServices => to_json(catalog::list_package_services(desk)),
        Command::AddPackageService { name } => to_json(catalog::add_package_service(desk, &name)?),
        Command::RemovePackageService { service_id } => {
            to_json(catalog::remove_package_service(desk, &service_id)?)
        }
        Command::ListPackages => to_json(catalog::list_packages(desk)),
        Command::AddPackage(draft) => to_json(catalog::add_package(desk, draft)?),
        Command::UpdatePackage {
            package_id,
            package,
        } => to_json(catalog::update_package(desk, &package_id, package)?),
        Command::RemovePackage { package_id } => to_json(catalog::remove_package(desk, &package_id)?),

        Command::ListInventory => to_json(inventory::list_inventory(desk)),
        Command::AddInventoryRoom {
            number,
            name,
            amenities,
        } => to_json(inventory::add_inventory_room(desk, &number, &name, amenities)?),
        Command::RemoveInventoryRoom { number } => {
            to_json(inventory::remove_inventory_room(desk, &number)?)
        }
        Command::RoomBoard { filter } => to_json(inventory::room_board(desk, filter)),

        Command::StartCheckIn { room_number } => to_json(stay::start_check_in(desk, &room_number)?),
        Command::CheckIn(request) => to_json(stay::check_in(desk, request)?),
        Command::SelectRoom { room_id } => to_json(stay::select_room(desk, &room_id)?),
        Command::ConfirmArrival { room_id } => to_json(stay::confirm_arrival(desk, &room_id)?),
        Command::RequestCancellation { room_id } => {
            to_json(stay::request_cancellation(desk, &room_id)?)
        }
        Command::ConfirmCancellation(request) => to_json(stay::confirm_cancellation(desk, request)?),
        Command::AddToOrder {
            room_id,
            product_id,
            confirm_duplicate,
        } => to_json(stay::add_to_order(desk, &room_id, &product_id, confirm_duplicate)?),
        Command::ChangeQuantity {
            room_id,
            product_id,
            delta,
        } => to_json(stay::change_quantity(desk, &room_id, &product_id, delta)?),
        Command::EditStay { room_id, edit } => to_json(stay::edit_stay(desk, &room_id, edit)?),

        Command::OpenCheckout { room_id } => to_json(checkout::open_checkout(desk, &room_id)?),
        Command::AddPayment { method, amount } => {
            to_json(checkout::add_payment(desk, method, &amount)?)
        }
        Command::RemovePayment { payment_id } => {
            to_json(checkout::remove_payment(desk, &payment_id)?)
        }
        Command::SetSplit { count } => to_json(checkout::set_split(desk, count)?),
        Command::ConfirmCheckout => to_json(checkout::confirm_checkout(desk)?),
        Command::CancelCheckout => to_json(checkout::cancel_checkout(desk)),

        Command::ListHistory { term } => to_json(history::list_history(desk, &term)),
        Command::Reopen { record_id } => to_json(history::reopen(desk, &record_id)?),
        Command::ClearHistory { confirm } => to_json(history::clear_history(desk, confirm)?),

        Command::Quote(request) => to_json(quote::quote(desk, request)?),
    }
}

/// Runs one command and writes back whatever it changed.
pub async fn dispatch(desk: &mut FrontDesk, command: Command) -> Result<Value, ApiError> {
    debug!(?command, "Dispatching command");
    let result = route(desk, command);
    desk.revalidate();
    desk.persist().await?;
    result
}

/// Decodes, runs and answers one input line.
pub async fn handle_line(desk: &mut FrontDesk, line: &str) -> Response {
    let result = match serde_json::from_str::<Command>(line) {
        Ok(command) => dispatch(desk, command).await,
        Err(e) => Err(ApiError::from(e)),
    };

    match result {
        Ok(data) => Response {
            ok: true,
            data: Some(data),
            error: None,
            screen: desk.screen().clone(),
        },
        Err(error) => {
            warn!(code = ?error.code, message = %error.message, "Command failed");
            Response {
                ok: false,
                data: None,
                error: Some(error),
                screen: desk.screen().clone(),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
