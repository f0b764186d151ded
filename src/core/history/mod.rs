mod entry_label;
mod history_store;
mod poller;
mod selection_controller;

pub use entry_label::format_entry_label;
pub use history_store::HistoryStore;
pub use poller::{PollTicket, Poller};
pub use selection_controller::{NavigationOutcome, SelectionController};
