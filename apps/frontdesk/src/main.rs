//! # Pousada Front Desk Entry Point
//!
//! ```text
//! $ echo '{"command":"room_board","args":{"filter":"available"}}' | pousada-frontdesk
//! {"ok":true,"data":[{"roomNumber":"101",...}],"screen":{"screen":"home"}}
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match pousada_frontdesk::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pousada-frontdesk: {}", e);
            ExitCode::FAILURE
        }
    }
}
