/// Logo vertex with model position and projected screen position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: [f64; 2],
    pub screen_position: [f64; 2],
}
