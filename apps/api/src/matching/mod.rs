// Resume skill extraction and job matching.
// Recognition, analysis and the offer store sit behind traits; the pipeline
// receives them at construction so tests can swap in fakes.

pub mod analysis;
pub mod error;
pub mod extractor;
pub mod handlers;
pub mod offers;
pub mod pipeline;
pub mod recognizer;
pub mod results;
pub mod scorer;
