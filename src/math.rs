/// Smallest icon size, reached with the pointer at the viewport center
pub const MIN_ICON_SIZE: f64 = 50.0;
/// Largest icon size, reached with the pointer in a viewport corner
pub const MAX_ICON_SIZE: f64 = 200.0;

/// Maps a pointer position to an icon size.
///
/// The distance from the pointer to the viewport center is normalized by the
/// center-to-corner distance and mapped linearly onto
/// `[MIN_ICON_SIZE, MAX_ICON_SIZE]`.
pub fn icon_size_for_pointer(x: f64, y: f64, width: f64, height: f64) -> f64 {
    let center_x = width / 2.0;
    let center_y = height / 2.0;

    let distance = ((x - center_x).powi(2) + (y - center_y).powi(2)).sqrt();
    let max_distance = (center_x.powi(2) + center_y.powi(2)).sqrt();
    if max_distance <= 0.0 {
        return MIN_ICON_SIZE;
    }

    let size = MIN_ICON_SIZE + (distance / max_distance) * (MAX_ICON_SIZE - MIN_ICON_SIZE);
    size.clamp(MIN_ICON_SIZE, MAX_ICON_SIZE)
}

/// Angle increment, in degrees, applied on every rotation tick
pub fn rotation_step(direction: f64, speed: u8) -> f64 {
    direction * (f64::from(speed) / 10.0)
}

/// Multiplies a 2x2 matrix by a 2-dimensional vector
pub fn multiply_matrix_vector(matrix: &[[f64; 2]; 2], vector: &[f64; 2]) -> [f64; 2] {
    let mut result = [0.0; 2];
    for i in 0..2 {
        for j in 0..2 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Rotation matrix for an angle in degrees (clockwise on screen, y grows down)
pub fn rotation_matrix(angle_degrees: f64) -> [[f64; 2]; 2] {
    let (sin_a, cos_a) = angle_degrees.to_radians().sin_cos();
    [[cos_a, -sin_a], [sin_a, cos_a]]
}

/// Rotates a point around the origin
pub fn rotate_point(point: &[f64; 2], angle_degrees: f64) -> [f64; 2] {
    multiply_matrix_vector(&rotation_matrix(angle_degrees), point)
}

/// Samples a closed ellipse centered on the origin and tilted by `tilt_degrees`.
///
/// The first point is repeated at the end so consecutive pairs form the outline.
pub fn ellipse_points(
    radius_x: f64,
    radius_y: f64,
    tilt_degrees: f64,
    segments: usize,
) -> Vec<[f64; 2]> {
    let segments = segments.max(3);
    let tilt = rotation_matrix(tilt_degrees);
    (0..=segments)
        .map(|i| {
            let t = (i % segments) as f64 / segments as f64 * std::f64::consts::TAU;
            let point = [radius_x * t.cos(), radius_y * t.sin()];
            multiply_matrix_vector(&tilt, &point)
        })
        .collect()
}
