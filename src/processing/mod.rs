pub mod normalize;
pub mod pairs;
pub mod pipeline;
pub mod scrape;
pub mod segment;
pub mod turns;

pub use normalize::{normalize, normalize_message};
pub use pairs::{build_pairs, train_string};
pub use pipeline::{build_dataset, run};
pub use segment::segment;
pub use turns::combine_turns;
