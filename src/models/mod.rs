//! Modelos del sistema
//! 
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL
//! (`stops`, `territories`, `checklist_items`, `posters`, `campaign_entries`)
//! y el tipo `Coordinate` usado por el núcleo de rutas.

pub mod campaign_entry;
pub mod checklist_item;
pub mod coordinate;
pub mod poster;
pub mod stop;
pub mod territory;

pub use campaign_entry::*;
pub use checklist_item::*;
pub use coordinate::*;
pub use poster::*;
pub use stop::*;
pub use territory::*;
