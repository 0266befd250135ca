//! Query-disk search parameters and the containment filter.

use crate::geometry::{circle_within_search_disk, Disc, Point, Rect};
use crate::model::circle::Circle;
use crate::model::frame::FrameId;
use crate::model::scalar::Scalar;
use crate::validation::{check_number, ArgumentProblem, ValidationError, ValidationErrors};
use uuid::Uuid;

/// Raw search parameters as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub center_x: Option<String>,
    pub center_y: Option<String>,
    pub radius: Option<String>,
    pub frame_id: Option<String>,
}

/// Validated circle search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSearch {
    pub center: Point,
    pub radius: f64,
    /// Restricts the search to one frame when set.
    pub frame_id: Option<FrameId>,
}

impl CircleSearch {
    /// Validates a search from scalar inputs.
    ///
    /// # Errors
    /// - `MissingParameter` for each absent center coordinate or radius.
    /// - `InvalidArgument` for non-numeric values and for `radius <= 0`.
    pub fn new(
        center_x: &Scalar,
        center_y: &Scalar,
        radius: &Scalar,
        frame_id: Option<FrameId>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let center_x = required("center_x", center_x, &mut errors);
        let center_y = required("center_y", center_y, &mut errors);
        let radius = required("radius", radius, &mut errors);

        if let Some(value) = radius {
            if value <= 0.0 {
                errors.push(ValidationError::InvalidArgument {
                    field: "radius",
                    problem: ArgumentProblem::NotPositive,
                });
            }
        }

        let (Some(x), Some(y), Some(radius)) = (center_x, center_y, radius) else {
            return Err(errors);
        };
        errors.into_result(Self {
            center: Point::new(x, y),
            radius,
            frame_id,
        })
    }

    /// Validates a search from query-string style parameters.
    ///
    /// A blank `frame_id` means "all frames".
    pub fn from_params(params: &SearchParams) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let frame_id = match params.frame_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match Uuid::parse_str(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push(ValidationError::InvalidArgument {
                        field: "frame_id",
                        problem: ArgumentProblem::NotUuid,
                    });
                    None
                }
            },
        };

        let search = Self::new(
            &Scalar::parse_opt(params.center_x.as_deref()),
            &Scalar::parse_opt(params.center_y.as_deref()),
            &Scalar::parse_opt(params.radius.as_deref()),
            frame_id,
        );
        match search {
            Ok(search) => errors.into_result(search),
            Err(search_errors) => {
                errors.extend(search_errors);
                Err(errors)
            }
        }
    }

    /// Inclusive axis-aligned box around the query disk.
    pub fn bounding_box(&self) -> Rect {
        Disc::with_radius(self.center, self.radius).bounding_box()
    }

    /// Returns `true` when `circle` is in scope and fully inside the disk.
    pub fn matches(&self, circle: &Circle) -> bool {
        if self.frame_id.is_some_and(|frame_id| frame_id != circle.frame_id) {
            return false;
        }
        circle_within_search_disk(&circle.disc(), self.center, self.radius)
    }

    /// Keeps only the circles matched by this search.
    pub fn filter(&self, circles: impl IntoIterator<Item = Circle>) -> Vec<Circle> {
        circles
            .into_iter()
            .filter(|circle| self.matches(circle))
            .collect()
    }
}

fn required(name: &'static str, value: &Scalar, errors: &mut ValidationErrors) -> Option<f64> {
    if value.is_missing() {
        errors.push(ValidationError::MissingParameter { name });
        return None;
    }
    check_number(name, value, errors)
}
