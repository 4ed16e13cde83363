pub mod history;

pub use history::aggregate_history;
