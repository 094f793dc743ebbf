pub mod keypoints;
pub mod landmark;
pub mod loader;

pub use keypoints::{extract_keypoints, BodyPart, NamedKeypoints, Point2D};
pub use landmark::{Landmark, LandmarkIndex, LandmarkSet};
pub use loader::{load_landmark_dir, load_landmark_file, parse_landmarks, save_landmark_file};
