//! # Commands Module
//!
//! One function per front-end event. Both the POS counter screen and the
//! waiter app call the same commands.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── product.rs    ◄─── Product grid, flavor options, catalog reload
//! ├── selection.rs  ◄─── Options modal: size, addons, flavors, qty, note
//! ├── cart.rs       ◄─── Cart manipulation
//! ├── order.rs      ◄─── Order payload and checkout
//! └── ticket.rs     ◄─── Replaying a saved ticket through the commands
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Front end taps "Calabresa"                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  toggle_flavor(                                                         │
//! │      &terminal.catalog,   ◄── only the state it needs                   │
//! │      &terminal.draft,                                                   │
//! │      "f2",                                                              │
//! │  ) -> Result<DraftView, ApiError>                                       │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Front end receives: DraftView { unitPriceCents, limitReached, ... }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod order;
pub mod product;
pub mod selection;
pub mod ticket;
