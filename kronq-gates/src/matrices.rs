//! Compile-time constant 2×2 gate matrices
//!
//! Fixed gates are `const` tables; parameterized gates are runtime
//! constructors.

use num_complex::Complex64;

// Compile-time constant helpers
const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

const INV_SQRT2: f64 = 0.7071067811865476; // 1/√2

/// Identity matrix
/// I = [[1, 0],
///      [0, 1]]
pub const IDENTITY: [[Complex64; 2]; 2] = [
    [ONE, ZERO],
    [ZERO, ONE],
];

/// Pauli-X gate matrix (NOT gate)
/// X = [[0, 1],
///      [1, 0]]
pub const PAULI_X: [[Complex64; 2]; 2] = [
    [ZERO, ONE],
    [ONE, ZERO],
];

/// Pauli-Y gate matrix
/// Y = [[0, -i],
///      [i,  0]]
pub const PAULI_Y: [[Complex64; 2]; 2] = [
    [ZERO, NEG_I],
    [I, ZERO],
];

/// Pauli-Z gate matrix
/// Z = [[1,  0],
///      [0, -1]]
pub const PAULI_Z: [[Complex64; 2]; 2] = [
    [ONE, ZERO],
    [ZERO, NEG_ONE],
];

/// Hadamard gate matrix
/// H = 1/√2 * [[1,  1],
///             [1, -1]]
pub const HADAMARD: [[Complex64; 2]; 2] = [
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(INV_SQRT2, 0.0),
    ],
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(-INV_SQRT2, 0.0),
    ],
];

/// Projector onto |0⟩
/// P0 = [[1, 0],
///       [0, 0]]
pub const PROJECTOR_ZERO: [[Complex64; 2]; 2] = [
    [ONE, ZERO],
    [ZERO, ZERO],
];

/// Projector onto |1⟩
/// P1 = [[0, 0],
///       [0, 1]]
pub const PROJECTOR_ONE: [[Complex64; 2]; 2] = [
    [ZERO, ZERO],
    [ZERO, ONE],
];

/// Phase rotation matrix for a given angle
/// U1(λ) = [[1, 0],
///          [0, e^(iλ)]]
pub fn phase(lambda: f64) -> [[Complex64; 2]; 2] {
    [
        [ONE, ZERO],
        [ZERO, Complex64::from_polar(1.0, lambda)],
    ]
}
