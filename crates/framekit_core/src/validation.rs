//! Placement validation for frames and circles.
//!
//! # Responsibility
//! - Decide whether a proposed frame or circle may be persisted.
//! - Report every violated rule in one aggregate, human-readable list.
//!
//! # Invariants
//! - Validators are pure: neighbors are passed in, nothing is read or written.
//! - Validators never stop at the first violation.
//! - Geometric rules run only once all scalar fields are usable.

use crate::geometry::{
    circle_fits_in_rectangle, circles_touch_or_overlap, rectangles_overlap_or_touch, Disc, Rect,
};
use crate::model::circle::{Circle, CircleDraft};
use crate::model::frame::{Frame, FrameDraft};
use crate::model::scalar::Scalar;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a scalar argument was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentProblem {
    Blank,
    NotANumber,
    NotPositive,
    NotUuid,
}

/// Which pair of shapes is in conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapKind {
    Frame,
    Circle,
}

/// One violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required search parameter is absent.
    MissingParameter { name: &'static str },
    /// A scalar is blank, non-numeric or outside its domain.
    InvalidArgument {
        field: &'static str,
        problem: ArgumentProblem,
    },
    /// A circle is not fully inside its frame.
    OutOfBounds,
    /// Two frames, or two circles of the same frame, touch or overlap.
    Overlap(OverlapKind),
    /// A circle submitted together with its new frame is invalid.
    NestedCircle {
        index: usize,
        error: Box<ValidationError>,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingParameter { name } => write!(f, "{name} is required"),
            Self::InvalidArgument { field, problem } => match problem {
                ArgumentProblem::Blank => write!(f, "{field} can't be blank"),
                ArgumentProblem::NotANumber => write!(f, "{field} is not a number"),
                ArgumentProblem::NotPositive => write!(f, "{field} must be greater than 0"),
                ArgumentProblem::NotUuid => write!(f, "{field} is not a valid id"),
            },
            Self::OutOfBounds => write!(f, "circle must fit completely inside its frame"),
            Self::Overlap(OverlapKind::Frame) => write!(f, "frame must not touch another frame"),
            Self::Overlap(OverlapKind::Circle) => {
                write!(f, "circle must not touch another circle in the same frame")
            }
            Self::NestedCircle { index, error } => write!(f, "circles[{index}]: {error}"),
        }
    }
}

/// Ordered, de-duplicated list of violated rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        if !self.errors.contains(&error) {
            self.errors.push(error);
        }
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        for error in other.errors {
            self.push(error);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.errors.contains(error)
    }

    /// Human-readable messages, one per violation.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// `Ok(value)` when nothing was recorded, `Err(self)` otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(value: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.push(value);
        errors
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl Error for ValidationErrors {}

/// Validates a proposed frame against every other persisted frame.
///
/// Returns the validated rectangle on success.
///
/// # Errors
/// - `InvalidArgument` for each blank, non-numeric or non-positive field.
/// - `Overlap(Frame)` when the rectangle touches or overlaps any other frame.
pub fn validate_frame_placement(
    candidate: &FrameDraft,
    other_frames: &[Frame],
) -> Result<Rect, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let x = check_number("x", &candidate.x, &mut errors);
    let y = check_number("y", &candidate.y, &mut errors);
    let width = check_positive("width", &candidate.width, &mut errors);
    let height = check_positive("height", &candidate.height, &mut errors);

    let (Some(x), Some(y), Some(width), Some(height)) = (x, y, width, height) else {
        return Err(errors);
    };

    let rect = Rect::new(x, y, width, height);
    if other_frames
        .iter()
        .any(|other| rectangles_overlap_or_touch(&rect, &other.rect()))
    {
        errors.push(ValidationError::Overlap(OverlapKind::Frame));
    }

    errors.into_result(rect)
}

/// Validates a proposed circle against its frame and sibling circles.
///
/// Siblings sharing the candidate's `id` are ignored, so an update is never
/// compared against its own stored state.
///
/// # Errors
/// - `InvalidArgument` for each blank, non-numeric or non-positive field.
/// - `OutOfBounds` when the circle leaves the frame rectangle.
/// - `Overlap(Circle)` when it touches or overlaps any sibling.
pub fn validate_circle_placement(
    candidate: &CircleDraft,
    owning_frame: &Frame,
    sibling_circles: &[Circle],
) -> Result<Disc, ValidationErrors> {
    let siblings = sibling_circles
        .iter()
        .filter(|sibling| Some(sibling.id) != candidate.id)
        .map(Circle::disc);
    check_circle(candidate, &owning_frame.rect(), siblings)
}

/// Validates a new frame together with the circles to be created inside it.
///
/// Nested circles are checked against the frame rectangle and against the
/// nested circles accepted before them. Their violations are reported as
/// `NestedCircle` entries next to the frame's own violations.
pub fn validate_frame_with_circles(
    candidate: &FrameDraft,
    other_frames: &[Frame],
) -> Result<(Rect, Vec<Disc>), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let rect = match validate_frame_placement(candidate, other_frames) {
        Ok(rect) => rect,
        Err(frame_errors) => {
            let fields_usable = !frame_errors
                .errors()
                .iter()
                .any(|error| matches!(error, ValidationError::InvalidArgument { .. }));
            errors.extend(frame_errors);
            match candidate.rect() {
                Some(rect) if fields_usable => rect,
                _ => return Err(errors),
            }
        }
    };

    let mut accepted: Vec<Disc> = Vec::with_capacity(candidate.circles.len());
    for (index, circle) in candidate.circles.iter().enumerate() {
        match check_circle(circle, &rect, accepted.iter().copied()) {
            Ok(disc) => accepted.push(disc),
            Err(circle_errors) => {
                for error in circle_errors.errors {
                    errors.push(ValidationError::NestedCircle {
                        index,
                        error: Box::new(error),
                    });
                }
            }
        }
    }

    errors.into_result((rect, accepted))
}

fn check_circle(
    candidate: &CircleDraft,
    frame_rect: &Rect,
    siblings: impl IntoIterator<Item = Disc>,
) -> Result<Disc, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let x = check_number("x", &candidate.x, &mut errors);
    let y = check_number("y", &candidate.y, &mut errors);
    let diameter = check_positive("diameter", &candidate.diameter, &mut errors);

    let (Some(x), Some(y), Some(diameter)) = (x, y, diameter) else {
        return Err(errors);
    };

    let disc = Disc::from_diameter(x, y, diameter);
    if !circle_fits_in_rectangle(&disc, frame_rect) {
        errors.push(ValidationError::OutOfBounds);
    }
    if siblings
        .into_iter()
        .any(|sibling| circles_touch_or_overlap(&disc, &sibling))
    {
        errors.push(ValidationError::Overlap(OverlapKind::Circle));
    }

    errors.into_result(disc)
}

/// Records a problem for non-usable numeric input and returns usable values.
pub(crate) fn check_number(
    field: &'static str,
    value: &Scalar,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    let problem = match value {
        Scalar::Missing => ArgumentProblem::Blank,
        Scalar::Invalid(_) => ArgumentProblem::NotANumber,
        Scalar::Number(number) if !number.is_finite() => ArgumentProblem::NotANumber,
        Scalar::Number(number) => return Some(*number),
    };
    errors.push(ValidationError::InvalidArgument { field, problem });
    None
}

pub(crate) fn check_positive(
    field: &'static str,
    value: &Scalar,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    let number = check_number(field, value, errors)?;
    if number <= 0.0 {
        errors.push(ValidationError::InvalidArgument {
            field,
            problem: ArgumentProblem::NotPositive,
        });
        return None;
    }
    Some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Disc;

    fn frame_at(x: f64, y: f64, width: f64, height: f64) -> Frame {
        Frame::new(Rect::new(x, y, width, height))
    }

    fn circle_in(frame: &Frame, x: f64, y: f64, diameter: f64) -> Circle {
        Circle::new(frame.id, Disc::from_diameter(x, y, diameter))
    }

    #[test]
    fn frame_sharing_an_edge_is_rejected() {
        let existing = frame_at(0.0, 0.0, 100.0, 100.0);
        let err = validate_frame_placement(&FrameDraft::new(100.0, 0.0, 100.0, 100.0), &[existing])
            .unwrap_err();
        assert_eq!(err.errors(), &[ValidationError::Overlap(OverlapKind::Frame)]);
    }

    #[test]
    fn separated_frame_is_accepted() {
        let existing = frame_at(0.0, 0.0, 100.0, 100.0);
        let rect =
            validate_frame_placement(&FrameDraft::new(100.5, 0.0, 50.0, 50.0), &[existing])
                .unwrap();
        assert_eq!(rect, Rect::new(100.5, 0.0, 50.0, 50.0));
    }

    #[test]
    fn overlap_is_reported_once_for_many_neighbors() {
        let neighbors = [
            frame_at(0.0, 0.0, 10.0, 10.0),
            frame_at(20.0, 0.0, 10.0, 10.0),
        ];
        let err = validate_frame_placement(&FrameDraft::new(5.0, 0.0, 20.0, 5.0), &neighbors)
            .unwrap_err();
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn frame_field_errors_are_all_collected() {
        let draft = FrameDraft {
            x: Scalar::Missing,
            y: Scalar::Invalid("abc".to_string()),
            width: Scalar::Number(0.0),
            height: Scalar::Number(-1.0),
            circles: Vec::new(),
        };
        let err = validate_frame_placement(&draft, &[]).unwrap_err();
        assert_eq!(
            err.messages(),
            vec![
                "x can't be blank",
                "y is not a number",
                "width must be greater than 0",
                "height must be greater than 0",
            ]
        );
    }

    #[test]
    fn circle_touching_frame_edge_is_accepted() {
        let frame = frame_at(1000.0, 1000.0, 100.0, 100.0);
        validate_circle_placement(&CircleDraft::new(1010.0, 1010.0, 20.0), &frame, &[]).unwrap();
    }

    #[test]
    fn circle_past_right_edge_is_out_of_bounds() {
        let frame = frame_at(1000.0, 1000.0, 100.0, 100.0);
        let err = validate_circle_placement(&CircleDraft::new(1095.0, 1050.0, 20.0), &frame, &[])
            .unwrap_err();
        assert_eq!(err.errors(), &[ValidationError::OutOfBounds]);
    }

    #[test]
    fn tangent_sibling_is_rejected() {
        let frame = frame_at(1000.0, 1000.0, 100.0, 100.0);
        let a = circle_in(&frame, 1050.0, 1050.0, 20.0);
        let err = validate_circle_placement(&CircleDraft::new(1050.0, 1030.0, 20.0), &frame, &[a])
            .unwrap_err();
        assert_eq!(err.errors(), &[ValidationError::Overlap(OverlapKind::Circle)]);
    }

    #[test]
    fn bounds_and_overlap_are_reported_together() {
        let frame = frame_at(1000.0, 1000.0, 100.0, 100.0);
        let a = circle_in(&frame, 1090.0, 1050.0, 20.0);
        let err = validate_circle_placement(&CircleDraft::new(1095.0, 1050.0, 20.0), &frame, &[a])
            .unwrap_err();
        assert!(err.contains(&ValidationError::OutOfBounds));
        assert!(err.contains(&ValidationError::Overlap(OverlapKind::Circle)));
    }

    #[test]
    fn circle_is_not_compared_with_itself() {
        let frame = frame_at(1000.0, 1000.0, 100.0, 100.0);
        let stored = circle_in(&frame, 1050.0, 1050.0, 20.0);
        let mut draft = CircleDraft::from(&stored);
        draft.x = Scalar::Number(1052.0);
        validate_circle_placement(&draft, &frame, &[stored]).unwrap();
    }

    #[test]
    fn nested_circles_are_checked_against_each_other() {
        let draft = FrameDraft::new(0.0, 0.0, 100.0, 100.0)
            .with_circle(CircleDraft::new(20.0, 20.0, 10.0))
            .with_circle(CircleDraft::new(30.0, 20.0, 10.0))
            .with_circle(CircleDraft::new(95.0, 50.0, 20.0));
        let err = validate_frame_with_circles(&draft, &[]).unwrap_err();
        assert_eq!(
            err.messages(),
            vec![
                "circles[1]: circle must not touch another circle in the same frame",
                "circles[2]: circle must fit completely inside its frame",
            ]
        );
    }

    #[test]
    fn frame_overlap_still_reports_nested_circle_problems() {
        let existing = frame_at(0.0, 0.0, 10.0, 10.0);
        let draft = FrameDraft::new(10.0, 0.0, 50.0, 50.0)
            .with_circle(CircleDraft::new(12.0, 12.0, 10.0));
        let err = validate_frame_with_circles(&draft, &[existing]).unwrap_err();
        assert_eq!(err.len(), 2);
        assert!(err.contains(&ValidationError::Overlap(OverlapKind::Frame)));
    }

    #[test]
    fn valid_batch_returns_rect_and_discs() {
        let draft = FrameDraft::new(0.0, 0.0, 100.0, 100.0)
            .with_circle(CircleDraft::new(20.0, 20.0, 10.0))
            .with_circle(CircleDraft::new(50.0, 50.0, 10.0));
        let (rect, discs) = validate_frame_with_circles(&draft, &[]).unwrap();
        assert_eq!(rect, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(discs.len(), 2);
    }

    #[test]
    fn circle_field_errors_skip_geometry() {
        let frame = frame_at(0.0, 0.0, 10.0, 10.0);
        let draft = CircleDraft {
            id: None,
            x: Scalar::Number(500.0),
            y: Scalar::Number(5.0),
            diameter: Scalar::Number(0.0),
        };
        let err = validate_circle_placement(&draft, &frame, &[]).unwrap_err();
        assert_eq!(err.messages(), vec!["diameter must be greater than 0"]);
    }
}
