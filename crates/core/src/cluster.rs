use serde::{Deserialize, Serialize};

/// Default visual radius of a rendered point, in pixels.
pub const POINT_RADIUS: f64 = 7.0;
/// Minimum members for a visual cluster.
const MIN_CLUSTER_SIZE: usize = 2;

/// Clustering configuration, derived from the point radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterParams {
    /// Visual radius of a rendered point.
    pub point_radius: f64,
}

impl ClusterParams {
    pub fn new(point_radius: f64) -> Self {
        Self { point_radius }
    }

    /// Two points whose centers are within this distance overlap visually.
    pub fn neighbor_radius(&self) -> f64 {
        2.0 * self.point_radius
    }
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self::new(POINT_RADIUS)
    }
}

/// A point's pixel position under the current transform. `index` refers
/// back into the caller's ordered point slice. Rebuilt every layout pass,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// A group of two or more visually-overlapping points drawn as one circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    /// Member point indices, ascending (input order).
    pub members: Vec<usize>,
}

/// Exact partition of the projected points: every input point appears in
/// exactly one cluster or exactly once among the singletons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterSet {
    pub clusters: Vec<Cluster>,
    pub singletons: Vec<usize>,
}

/// Density-based grouping of projected points: a cluster forms wherever at
/// least two points sit within the neighbor radius of one another, and
/// grows by absorbing everything reachable through further dense points.
///
/// Deterministic by construction: seeds scan in input order, neighbor
/// queries return ascending indices, and members are sorted before the
/// cluster is built — identical input yields bit-identical output. The
/// quadratic neighbor search is fine at timeline scales (tens to low
/// thousands of points, re-run on every transform tick).
pub fn cluster(points: &[ProjectedPoint], params: &ClusterParams) -> ClusterSet {
    let eps = params.neighbor_radius();
    let n = points.len();
    let mut visited = vec![false; n];
    let mut grouped = vec![false; n];
    let mut clusters = Vec::new();
    let mut neighbors = Vec::new();

    for seed in 0..n {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;

        neighbors.clear();
        region_query(points, seed, eps, &mut neighbors);
        if neighbors.len() < MIN_CLUSTER_SIZE {
            // Noise for now; a later dense point may still absorb it.
            continue;
        }

        let mut members = vec![seed];
        grouped[seed] = true;
        let mut frontier = neighbors.clone();
        let mut cursor = 0;
        while cursor < frontier.len() {
            let candidate = frontier[cursor];
            cursor += 1;
            if !visited[candidate] {
                visited[candidate] = true;
                neighbors.clear();
                region_query(points, candidate, eps, &mut neighbors);
                if neighbors.len() >= MIN_CLUSTER_SIZE {
                    frontier.extend_from_slice(&neighbors);
                }
            }
            if !grouped[candidate] {
                grouped[candidate] = true;
                members.push(candidate);
            }
        }
        members.sort_unstable();

        // A group that never grew past its seed is not visual overlap;
        // demote it back to a plain point.
        if members.len() < MIN_CLUSTER_SIZE {
            grouped[seed] = false;
            continue;
        }
        clusters.push(build_cluster(points, &members, params.point_radius));
    }

    let singletons = (0..n)
        .filter(|&i| !grouped[i])
        .map(|i| points[i].index)
        .collect();
    ClusterSet {
        clusters,
        singletons,
    }
}

/// All slice positions within `eps` of `center` (the center included),
/// ascending. The distance runs over the 2-D coordinate pair even though
/// every point shares one row.
fn region_query(points: &[ProjectedPoint], center: usize, eps: f64, out: &mut Vec<usize>) {
    let c = points[center];
    for (i, p) in points.iter().enumerate() {
        let dx = p.x - c.x;
        let dy = p.y - c.y;
        if (dx * dx + dy * dy).sqrt() <= eps {
            out.push(i);
        }
    }
}

fn build_cluster(points: &[ProjectedPoint], members: &[usize], point_radius: f64) -> Cluster {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &m in members {
        min_x = min_x.min(points[m].x);
        max_x = max_x.max(points[m].x);
    }
    let radius = (max_x - min_x + 2.0 * point_radius) / 2.0;
    let center_x = min_x - point_radius + radius;
    // All members share the row, so any member's y is the cluster's.
    let center_y = members.first().map_or(0.0, |&m| points[m].y);
    Cluster {
        center_x,
        center_y,
        radius,
        members: members.iter().map(|&m| points[m].index).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(xs: &[f64]) -> Vec<ProjectedPoint> {
        xs.iter()
            .enumerate()
            .map(|(index, &x)| ProjectedPoint { index, x, y: 150.0 })
            .collect()
    }

    fn params() -> ClusterParams {
        ClusterParams::default()
    }

    #[test]
    fn spread_points_stay_singletons() {
        let points = row(&[0.0, 90.0, 180.0, 270.0, 360.0]);
        let set = cluster(&points, &params());
        assert!(set.clusters.is_empty());
        assert_eq!(set.singletons, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn overlapping_points_form_one_cluster() {
        // Five points within a 2px spread, radius 7.
        let points = row(&[100.0, 100.5, 101.0, 101.5, 102.0]);
        let set = cluster(&points, &params());
        assert_eq!(set.clusters.len(), 1);
        assert!(set.singletons.is_empty());

        let c = &set.clusters[0];
        assert_eq!(c.members, vec![0, 1, 2, 3, 4]);
        // radius = (spread + 2 * point_radius) / 2
        assert!((c.radius - (2.0 + 14.0) / 2.0).abs() < 1e-9);
        assert!((c.center_x - (100.0 - 7.0 + c.radius)).abs() < 1e-9);
        assert_eq!(c.center_y, 150.0);
    }

    #[test]
    fn chained_density_merges_transitively() {
        // Neighbors of neighbors join the same cluster even when the ends
        // are further apart than the neighbor radius.
        let points = row(&[0.0, 10.0, 20.0, 30.0]);
        let set = cluster(&points, &params());
        assert_eq!(set.clusters.len(), 1);
        assert_eq!(set.clusters[0].members, vec![0, 1, 2, 3]);
    }

    #[test]
    fn separate_groups_form_separate_clusters() {
        let points = row(&[0.0, 5.0, 500.0, 505.0, 900.0]);
        let set = cluster(&points, &params());
        assert_eq!(set.clusters.len(), 2);
        assert_eq!(set.clusters[0].members, vec![0, 1]);
        assert_eq!(set.clusters[1].members, vec![2, 3]);
        assert_eq!(set.singletons, vec![4]);
    }

    #[test]
    fn partition_is_exact() {
        let points = row(&[
            3.0, 4.0, 11.0, 80.0, 81.5, 82.0, 200.0, 413.0, 414.0, 650.0,
        ]);
        let set = cluster(&points, &params());

        let mut seen: Vec<usize> = set.singletons.clone();
        for c in &set.clusters {
            assert!(c.members.len() >= 2, "cluster below minimum size");
            seen.extend_from_slice(&c.members);
        }
        seen.sort_unstable();
        let expected: Vec<usize> = (0..points.len()).collect();
        assert_eq!(seen, expected, "every point in exactly one group");
    }

    #[test]
    fn members_lie_within_cluster_extent() {
        let points = row(&[10.0, 12.0, 13.0, 26.0, 27.5, 400.0]);
        let set = cluster(&points, &params());
        assert!(!set.clusters.is_empty());
        for c in &set.clusters {
            for &m in &c.members {
                let x = points[m].x;
                assert!(
                    x >= c.center_x - c.radius && x <= c.center_x + c.radius,
                    "member x={x} outside [{}, {}]",
                    c.center_x - c.radius,
                    c.center_x + c.radius
                );
            }
        }
    }

    #[test]
    fn identical_input_reproduces_identical_output() {
        let points = row(&[5.0, 6.0, 7.0, 100.0, 101.0, 300.0, 301.0, 302.0, 700.0]);
        let first = cluster(&points, &params());
        let second = cluster(&points, &params());
        assert_eq!(first, second);
    }

    #[test]
    fn member_order_preserves_input_order() {
        // Input order deliberately scrambled relative to x order.
        let points = vec![
            ProjectedPoint {
                index: 0,
                x: 105.0,
                y: 150.0,
            },
            ProjectedPoint {
                index: 1,
                x: 100.0,
                y: 150.0,
            },
            ProjectedPoint {
                index: 2,
                x: 110.0,
                y: 150.0,
            },
        ];
        let set = cluster(&points, &params());
        assert_eq!(set.clusters.len(), 1);
        assert_eq!(set.clusters[0].members, vec![0, 1, 2]);
    }

    #[test]
    fn empty_input_is_empty_partition() {
        let set = cluster(&[], &params());
        assert!(set.clusters.is_empty());
        assert!(set.singletons.is_empty());
    }

    #[test]
    fn two_points_at_exact_neighbor_radius_merge() {
        let points = row(&[100.0, 114.0]);
        let set = cluster(&points, &params());
        assert_eq!(set.clusters.len(), 1);
    }
}
