//! Word and n-gram frequency analysis.
//!
//! An analysis turns a [`Dataset`](crate::document::Dataset) and an
//! [`AnalysisConfig`](crate::config::AnalysisConfig) into an
//! [`AnalysisResult`]. Two strategies compute the same result shape:
//!
//! - the fast path folds precomputed term frequencies when the analysis is a
//!   single block per unit of analysis over unstemmed unigrams;
//! - the general path rebuilds token order from positions, forms n-grams and
//!   segments the streams into blocks.
//!
//! [`FrequencyAnalyzer`] validates, fetches term vectors and dispatches.

pub mod culler;
pub mod dispatcher;
pub mod fast;
pub mod general;
pub mod progress;
pub mod result;
pub mod segmenter;

pub use culler::{WordListCuller, rank_by_frequency};
pub use dispatcher::{AnalysisStrategy, FrequencyAnalyzer};
pub use progress::Progress;
pub use result::{AnalysisResult, Block, BlockStats, Counts};
pub use segmenter::{BlockPlan, ClosedBlock, Segmenter};
