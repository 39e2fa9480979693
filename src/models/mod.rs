pub mod benchmark;
pub mod movement;
pub mod parsed;
pub mod workout;

pub use benchmark::{BenchmarkPr, NewBenchmarkPr};
pub use movement::{Movement, NewMovement};
pub use parsed::{Block, BlockScore, BlockType, ParsedWorkout, ScoreModel, Scoring};
pub use workout::{BlockScoreRow, NewBlockScore, NewWorkout, Workout, WorkoutSummary};
