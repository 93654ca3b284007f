use thiserror::Error;

use crate::hand::Finger;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GestureError {
    #[error("gesture name must not be empty")]
    EmptyName,
    #[error("weight {weight} for {finger} in '{gesture}' is outside [0, 1]")]
    InvalidWeight {
        gesture: String,
        finger: Finger,
        weight: f32,
    },
    #[error("finger weight {weight} for {finger} in '{gesture}' must be finite and non-negative")]
    InvalidFingerWeight {
        gesture: String,
        finger: Finger,
        weight: f32,
    },
    #[error("gesture '{0}' is already registered")]
    DuplicateName(String),
}
