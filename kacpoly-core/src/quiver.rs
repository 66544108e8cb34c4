use crate::arith::gcd_all;
use crate::{KacError, KacResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Directed multigraph with a dimension vector. Loops and parallel edges
/// are allowed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuiver")]
pub struct Quiver {
    vertices: Vec<String>,
    edges: Vec<(String, String)>,
    dimension: Vec<u32>,
}

/// Unvalidated wire form; dimensions are signed so negative input can be
/// reported instead of failing to parse.
#[derive(Deserialize)]
struct RawQuiver {
    vertices: Vec<String>,
    #[serde(default)]
    edges: Vec<(String, String)>,
    dimension: Vec<i64>,
}

impl TryFrom<RawQuiver> for Quiver {
    type Error = KacError;

    fn try_from(raw: RawQuiver) -> Result<Self, Self::Error> {
        Quiver::from_signed(raw.vertices, raw.edges, raw.dimension)
    }
}

impl Quiver {
    pub fn new(
        vertices: Vec<String>,
        edges: Vec<(String, String)>,
        dimension: Vec<u32>,
    ) -> KacResult<Self> {
        if dimension.len() != vertices.len() {
            return Err(KacError::InvalidQuiverDefinition(format!(
                "dimension vector has {} entries for {} vertices",
                dimension.len(),
                vertices.len()
            )));
        }
        let mut seen = HashSet::new();
        for v in &vertices {
            if !seen.insert(v.as_str()) {
                return Err(KacError::InvalidQuiverDefinition(format!(
                    "duplicate vertex '{}'",
                    v
                )));
            }
        }
        for (s, t) in &edges {
            for end in [s, t] {
                if !seen.contains(end.as_str()) {
                    return Err(KacError::InvalidQuiverDefinition(format!(
                        "edge {} -> {} references unknown vertex '{}'",
                        s, t, end
                    )));
                }
            }
        }
        Ok(Self {
            vertices,
            edges,
            dimension,
        })
    }

    /// Like [`Quiver::new`], rejecting negative entries.
    pub fn from_signed(
        vertices: Vec<String>,
        edges: Vec<(String, String)>,
        dimension: Vec<i64>,
    ) -> KacResult<Self> {
        let mut dims = Vec::with_capacity(dimension.len());
        for (i, &d) in dimension.iter().enumerate() {
            if d < 0 {
                let vertex = vertices.get(i).cloned().unwrap_or_else(|| format!("#{}", i));
                return Err(KacError::NegativeDimension { vertex, value: d });
            }
            let d = u32::try_from(d).map_err(|_| {
                KacError::InvalidQuiverDefinition(format!("dimension {} is too large", d))
            })?;
            dims.push(d);
        }
        Self::new(vertices, edges, dims)
    }

    /// Borrowed-string convenience constructor.
    pub fn from_strs(vertices: &[&str], edges: &[(&str, &str)], dimension: &[u32]) -> KacResult<Self> {
        Self::new(
            vertices.iter().map(|v| v.to_string()).collect(),
            edges.iter().map(|(s, t)| (s.to_string(), t.to_string())).collect(),
            dimension.to_vec(),
        )
    }

    /// One vertex `v` carrying `n_loops` loops.
    pub fn loops(n_loops: usize, dim: u32) -> Self {
        Self {
            vertices: vec!["v".to_string()],
            edges: vec![("v".to_string(), "v".to_string()); n_loops],
            dimension: vec![dim],
        }
    }

    /// Same graph, different dimension vector.
    pub fn with_dimension(&self, dimension: Vec<u32>) -> KacResult<Self> {
        Self::new(self.vertices.clone(), self.edges.clone(), dimension)
    }

    pub fn vertices(&self) -> &[String] {
        &self.vertices
    }

    pub fn edges(&self) -> &[(String, String)] {
        &self.edges
    }

    pub fn dimension(&self) -> &[u32] {
        &self.dimension
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex_index(&self, name: &str) -> Option<usize> {
        self.vertices.iter().position(|v| v == name)
    }

    /// Edges between `v1` and `v2`: both directions for distinct vertices,
    /// each loop once when `v1 == v2`.
    pub fn edge_count(&self, v1: &str, v2: &str) -> usize {
        self.edges
            .iter()
            .filter(|(s, t)| {
                if v1 == v2 {
                    s == v1 && t == v1
                } else {
                    (s == v1 && t == v2) || (s == v2 && t == v1)
                }
            })
            .count()
    }

    /// [`Quiver::edge_count`] by vertex index.
    pub fn edge_count_at(&self, i: usize, j: usize) -> usize {
        self.edge_count(&self.vertices[i], &self.vertices[j])
    }

    /// gcd of the dimension vector; 0 when every entry is zero.
    pub fn dimension_gcd(&self) -> u32 {
        gcd_all(&self.dimension)
    }
}

impl fmt::Display for Quiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edges: Vec<String> = self.edges.iter().map(|(s, t)| format!("{}->{}", s, t)).collect();
        let dims: Vec<String> = self.dimension.iter().map(|d| d.to_string()).collect();
        write!(
            f,
            "Quiver[{}] edges {{{}}} dim ({})",
            self.vertices.join(","),
            edges.join(", "),
            dims.join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_count() {
        let q = Quiver::from_strs(
            &["a", "b"],
            &[("a", "b"), ("b", "a"), ("a", "b"), ("a", "a"), ("a", "a")],
            &[1, 1],
        )
        .unwrap();
        assert_eq!(q.edge_count("a", "b"), 3);
        assert_eq!(q.edge_count("b", "a"), 3);
        assert_eq!(q.edge_count("a", "a"), 2);
        assert_eq!(q.edge_count("b", "b"), 0);
        assert_eq!(q.edge_count_at(0, 0), 2);
    }

    #[test]
    fn test_invalid_definitions() {
        assert!(matches!(
            Quiver::from_strs(&["a"], &[], &[1, 2]),
            Err(KacError::InvalidQuiverDefinition(_))
        ));
        assert!(matches!(
            Quiver::from_strs(&["a"], &[("a", "z")], &[1]),
            Err(KacError::InvalidQuiverDefinition(_))
        ));
        assert!(matches!(
            Quiver::from_strs(&["a", "a"], &[], &[1, 1]),
            Err(KacError::InvalidQuiverDefinition(_))
        ));
        assert_eq!(
            Quiver::from_signed(vec!["a".into()], vec![], vec![-2]),
            Err(KacError::NegativeDimension {
                vertex: "a".into(),
                value: -2
            })
        );
    }

    #[test]
    fn test_loops_and_gcd() {
        let q = Quiver::loops(3, 4);
        assert_eq!(q.edge_count("v", "v"), 3);
        assert_eq!(q.dimension_gcd(), 4);
        assert_eq!(q.with_dimension(vec![0]).unwrap().dimension_gcd(), 0);
        assert!(q.with_dimension(vec![1, 1]).is_err());
    }

    #[test]
    fn test_json_roundtrip_validates() {
        let json = r#"{"vertices":["a","b"],"edges":[["a","b"],["a","b"]],"dimension":[1,2]}"#;
        let q: Quiver = serde_json::from_str(json).unwrap();
        assert_eq!(q.edge_count("a", "b"), 2);
        let back: Quiver = serde_json::from_str(&serde_json::to_string(&q).unwrap()).unwrap();
        assert_eq!(back, q);

        let bad = r#"{"vertices":["a"],"dimension":[-1]}"#;
        assert!(serde_json::from_str::<Quiver>(bad).is_err());
    }
}
