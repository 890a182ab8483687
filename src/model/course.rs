use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::mvu::error::AppError;

pub const MAX_HOLES: usize = 18;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hole {
    pub number: u8,
    pub par: u8,
    pub stroke_index: u8,
}

impl Hole {
    #[must_use]
    pub const fn new(number: u8, par: u8, stroke_index: u8) -> Self {
        Self {
            number,
            par,
            stroke_index,
        }
    }
}

const DEFAULT_HOLES: [Hole; MAX_HOLES] = [
    Hole::new(1, 4, 7),
    Hole::new(2, 3, 15),
    Hole::new(3, 4, 11),
    Hole::new(4, 4, 3),
    Hole::new(5, 4, 1),
    Hole::new(6, 5, 17),
    Hole::new(7, 4, 5),
    Hole::new(8, 5, 13),
    Hole::new(9, 3, 9),
    Hole::new(10, 5, 18),
    Hole::new(11, 4, 10),
    Hole::new(12, 4, 4),
    Hole::new(13, 4, 2),
    Hole::new(14, 4, 6),
    Hole::new(15, 3, 14),
    Hole::new(16, 4, 12),
    Hole::new(17, 3, 16),
    Hole::new(18, 5, 8),
];

/// An ordered, validated set of holes. Stroke indexes always form a
/// permutation of `1..=len`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Course {
    holes: Vec<Hole>,
}

impl Course {
    /// Build a course from a hole list.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the list is empty or longer than 18 holes,
    /// if holes are not numbered `1..=n` in order, if a par is outside `3..=5`,
    /// or if the stroke indexes are not a permutation of `1..=n`.
    pub fn new(holes: Vec<Hole>) -> Result<Self, AppError> {
        if holes.is_empty() || holes.len() > MAX_HOLES {
            return Err(AppError::Validation(format!(
                "a course needs between 1 and {MAX_HOLES} holes, got {}",
                holes.len()
            )));
        }

        let mut seen = BTreeSet::new();
        for (idx, hole) in holes.iter().enumerate() {
            if usize::from(hole.number) != idx + 1 {
                return Err(AppError::Validation(format!(
                    "hole at position {} is numbered {}",
                    idx + 1,
                    hole.number
                )));
            }
            if !(3..=5).contains(&hole.par) {
                return Err(AppError::Validation(format!(
                    "hole {} has par {}, expected 3 to 5",
                    hole.number, hole.par
                )));
            }
            let si = usize::from(hole.stroke_index);
            if si == 0 || si > holes.len() || !seen.insert(si) {
                return Err(AppError::Validation(format!(
                    "hole {} has stroke index {}, stroke indexes must be a permutation of 1..={}",
                    hole.number,
                    hole.stroke_index,
                    holes.len()
                )));
            }
        }

        Ok(Self { holes })
    }

    #[must_use]
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    #[must_use]
    pub fn hole(&self, index: usize) -> Option<&Hole> {
        self.holes.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.holes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }

    #[must_use]
    pub fn total_par(&self) -> u32 {
        self.holes.iter().map(|h| u32::from(h.par)).sum()
    }
}

impl Default for Course {
    fn default() -> Self {
        Self {
            holes: DEFAULT_HOLES.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_course_is_valid() {
        let course = Course::default();
        assert_eq!(course.len(), 18);
        assert_eq!(course.total_par(), 72);
        assert!(Course::new(course.holes().to_vec()).is_ok());
    }

    #[test]
    fn duplicate_stroke_index_rejected() {
        let holes = vec![Hole::new(1, 4, 1), Hole::new(2, 4, 1)];
        assert!(matches!(Course::new(holes), Err(AppError::Validation(_))));
    }

    #[test]
    fn stroke_index_out_of_range_rejected() {
        let holes = vec![Hole::new(1, 4, 1), Hole::new(2, 4, 3)];
        assert!(Course::new(holes).is_err());
    }

    #[test]
    fn bad_par_and_numbering_rejected() {
        assert!(Course::new(vec![Hole::new(1, 6, 1)]).is_err());
        assert!(Course::new(vec![Hole::new(2, 4, 1)]).is_err());
        assert!(Course::new(vec![]).is_err());
    }
}
