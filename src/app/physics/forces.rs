use eframe::egui::Vec2;

use crate::util::golden_direction;

use super::SimNode;
use super::quadtree::QuadTree;

/// Offset used when two points coincide exactly, so a direction still exists.
const JIGGLE: f32 = 1e-6;

/// A force contributes velocity changes to nodes once per tick.
pub trait Force {
    fn name(&self) -> &'static str;
    fn apply(&mut self, nodes: &mut [SimNode], alpha: f32);
}

fn separation(delta: Vec2, a: usize, b: usize) -> Vec2 {
    if delta.length_sq() > 0.0 {
        delta
    } else {
        golden_direction(a, b) * JIGGLE
    }
}

struct Link {
    source: usize,
    target: usize,
    strength: f32,
    bias: f32,
}

/// Springs every edge toward a rest length. Links between busy nodes are
/// weaker, and the lighter endpoint moves more.
pub struct LinkForce {
    links: Vec<Link>,
    distance: f32,
    iterations: usize,
}

impl LinkForce {
    pub fn new(node_count: usize, edges: &[(usize, usize)], distance: f32, iterations: usize) -> Self {
        let edges = edges
            .iter()
            .copied()
            .filter(|&(source, target)| source < node_count && target < node_count)
            .collect::<Vec<_>>();

        let mut degree = vec![0usize; node_count];
        for &(source, target) in &edges {
            degree[source] += 1;
            degree[target] += 1;
        }

        let links = edges
            .into_iter()
            .map(|(source, target)| {
                let source_degree = degree[source] as f32;
                let target_degree = degree[target] as f32;
                Link {
                    source,
                    target,
                    strength: 1.0 / source_degree.min(target_degree),
                    bias: source_degree / (source_degree + target_degree),
                }
            })
            .collect();

        Self {
            links,
            distance,
            iterations: iterations.max(1),
        }
    }
}

impl Force for LinkForce {
    fn name(&self) -> &'static str {
        "link"
    }

    fn apply(&mut self, nodes: &mut [SimNode], alpha: f32) {
        for _ in 0..self.iterations {
            for link in &self.links {
                let source = &nodes[link.source];
                let target = &nodes[link.target];
                let delta = separation(
                    (target.pos + target.velocity) - (source.pos + source.velocity),
                    link.source,
                    link.target,
                );

                let length = delta.length();
                let stretch = delta * ((length - self.distance) / length * alpha * link.strength);

                nodes[link.target].velocity -= stretch * link.bias;
                nodes[link.source].velocity += stretch * (1.0 - link.bias);
            }
        }
    }
}

/// Pairwise charge between all nodes, approximated with Barnes-Hut for
/// far-away quadtree cells. Negative strength repels.
pub struct ManyBodyForce {
    strength: f32,
    theta_sq: f32,
    min_distance_sq: f32,
    positions: Vec<Vec2>,
}

impl ManyBodyForce {
    pub fn new(strength: f32, theta: f32) -> Self {
        Self {
            strength,
            theta_sq: theta * theta,
            min_distance_sq: 1.0,
            positions: Vec::new(),
        }
    }

    fn charge(&self, delta: Vec2, weight: f32, alpha: f32, a: usize, b: usize) -> Vec2 {
        let delta = separation(delta, a, b);
        let mut distance_sq = delta.length_sq();
        if distance_sq < self.min_distance_sq {
            distance_sq = (self.min_distance_sq * distance_sq).sqrt();
        }
        delta * (self.strength * weight * alpha / distance_sq)
    }

    fn accumulate(&self, cell: &QuadTree, index: usize, alpha: f32, velocity: &mut Vec2) {
        if cell.count == 0 {
            return;
        }

        let point = self.positions[index];
        if cell.is_leaf() {
            for &other in &cell.points {
                if other != index {
                    *velocity += self.charge(self.positions[other] - point, 1.0, alpha, index, other);
                }
            }
            return;
        }

        let delta = cell.centroid - point;
        let side = cell.square.side();
        if !cell.square.contains(point) && side * side / self.theta_sq < delta.length_sq() {
            *velocity += self.charge(delta, cell.count as f32, alpha, index, cell.count);
            return;
        }

        for child in cell.children() {
            self.accumulate(child, index, alpha, velocity);
        }
    }
}

impl Force for ManyBodyForce {
    fn name(&self) -> &'static str {
        "charge"
    }

    fn apply(&mut self, nodes: &mut [SimNode], alpha: f32) {
        self.positions.clear();
        self.positions.extend(nodes.iter().map(|node| node.pos));
        let Some(tree) = QuadTree::build(&self.positions) else {
            return;
        };

        for (index, node) in nodes.iter_mut().enumerate() {
            let mut velocity = Vec2::ZERO;
            self.accumulate(&tree, index, alpha, &mut velocity);
            node.velocity += velocity;
        }
    }
}

/// Weak pull of every node toward a fixed point on both axes.
pub struct CenterForce {
    center: Vec2,
    strength: f32,
}

impl CenterForce {
    pub fn new(center: Vec2, strength: f32) -> Self {
        Self { center, strength }
    }
}

impl Force for CenterForce {
    fn name(&self) -> &'static str {
        "center"
    }

    fn apply(&mut self, nodes: &mut [SimNode], alpha: f32) {
        let scale = self.strength * alpha;
        for node in nodes {
            node.velocity += (self.center - node.pos) * scale;
        }
    }
}

/// Treats nodes as circles of a fixed radius and pushes overlapping pairs
/// apart, using positions predicted from the current velocities.
pub struct CollideForce {
    radius: f32,
    strength: f32,
    iterations: usize,
    positions: Vec<Vec2>,
    nudges: Vec<Vec2>,
}

impl CollideForce {
    pub fn new(radius: f32, strength: f32, iterations: usize) -> Self {
        Self {
            radius,
            strength,
            iterations: iterations.max(1),
            positions: Vec::new(),
            nudges: Vec::new(),
        }
    }

    fn resolve(&mut self, a: usize, b: usize) {
        let reach = self.radius * 2.0;
        let delta = self.positions[a] - self.positions[b];
        if delta.length_sq() >= reach * reach {
            return;
        }

        let delta = separation(delta, a, b);
        let distance = delta.length();
        let push = delta * ((reach - distance) / distance * self.strength * 0.5);
        self.nudges[a] += push;
        self.nudges[b] -= push;
    }

    fn collide_cells(&mut self, first: &QuadTree, second: &QuadTree, same: bool) {
        let reach = self.radius * 2.0;
        if first.square.gap_sq(second.square) > reach * reach {
            return;
        }

        if first.is_leaf() && second.is_leaf() {
            if same {
                for (offset, &a) in first.points.iter().enumerate() {
                    for &b in &first.points[offset + 1..] {
                        self.resolve(a, b);
                    }
                }
            } else {
                for &a in &first.points {
                    for &b in &second.points {
                        self.resolve(a, b);
                    }
                }
            }
            return;
        }

        if same {
            let children = first.children().collect::<Vec<_>>();
            for (offset, child) in children.iter().enumerate() {
                self.collide_cells(child, child, true);
                for other in &children[offset + 1..] {
                    self.collide_cells(child, other, false);
                }
            }
            return;
        }

        let split_first = !first.is_leaf()
            && (second.is_leaf() || first.square.half_extent >= second.square.half_extent);
        if split_first {
            for child in first.children() {
                self.collide_cells(child, second, false);
            }
        } else {
            for child in second.children() {
                self.collide_cells(first, child, false);
            }
        }
    }
}

impl Force for CollideForce {
    fn name(&self) -> &'static str {
        "collide"
    }

    fn apply(&mut self, nodes: &mut [SimNode], _alpha: f32) {
        for _ in 0..self.iterations {
            self.positions.clear();
            self.positions
                .extend(nodes.iter().map(|node| node.pos + node.velocity));
            let Some(tree) = QuadTree::build(&self.positions) else {
                return;
            };

            self.nudges.clear();
            self.nudges.resize(nodes.len(), Vec2::ZERO);
            self.collide_cells(&tree, &tree, true);

            for (node, nudge) in nodes.iter_mut().zip(&self.nudges) {
                node.velocity += *nudge;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;
    use crate::graph::DocumentId;

    fn node_at(index: usize, x: f32, y: f32) -> SimNode {
        SimNode::new(DocumentId::from(index as u64), String::new(), vec2(x, y))
    }

    #[test]
    fn stretched_link_pulls_endpoints_together() {
        let mut nodes = vec![node_at(0, 0.0, 0.0), node_at(1, 300.0, 0.0)];
        let mut link = LinkForce::new(2, &[(0, 1)], 130.0, 1);
        link.apply(&mut nodes, 1.0);

        assert!(nodes[0].velocity.x > 0.0);
        assert!(nodes[1].velocity.x < 0.0);
        assert!((nodes[0].velocity.x + nodes[1].velocity.x).abs() < 1e-3);
    }

    #[test]
    fn compressed_link_pushes_endpoints_apart() {
        let mut nodes = vec![node_at(0, 0.0, 0.0), node_at(1, 20.0, 0.0)];
        let mut link = LinkForce::new(2, &[(0, 1)], 130.0, 1);
        link.apply(&mut nodes, 1.0);

        assert!(nodes[0].velocity.x < 0.0);
        assert!(nodes[1].velocity.x > 0.0);
    }

    #[test]
    fn negative_charge_repels() {
        let mut nodes = vec![node_at(0, 0.0, 0.0), node_at(1, 50.0, 0.0)];
        let mut charge = ManyBodyForce::new(-300.0, 0.9);
        charge.apply(&mut nodes, 1.0);

        assert!(nodes[0].velocity.x < 0.0);
        assert!(nodes[1].velocity.x > 0.0);
    }

    #[test]
    fn barnes_hut_matches_pairwise_for_distant_cluster() {
        let mut nodes = (0..40)
            .map(|index| node_at(index, (index % 8) as f32 * 3.0, (index / 8) as f32 * 3.0))
            .collect::<Vec<_>>();
        nodes.push(node_at(40, 2_000.0, 0.0));

        let mut charge = ManyBodyForce::new(-300.0, 0.9);
        charge.apply(&mut nodes, 1.0);

        let far = nodes[40].pos;
        let exact = nodes[..40].iter().fold(Vec2::ZERO, |sum, other| {
            let delta = other.pos - far;
            sum + delta * (-300.0 / delta.length_sq())
        });
        let approx = nodes[40].velocity;
        assert!((approx - exact).length() < exact.length() * 0.05);
    }

    #[test]
    fn coincident_nodes_still_separate() {
        let mut nodes = vec![node_at(0, 10.0, 10.0), node_at(1, 10.0, 10.0)];
        let mut charge = ManyBodyForce::new(-300.0, 0.9);
        charge.apply(&mut nodes, 1.0);

        assert!(nodes[0].velocity.length() > 0.0);
        assert!(nodes.iter().all(|node| node.velocity.x.is_finite()));
    }

    #[test]
    fn center_pulls_toward_midpoint() {
        let mut nodes = vec![node_at(0, 100.0, -50.0)];
        let mut center = CenterForce::new(Vec2::ZERO, 0.05);
        center.apply(&mut nodes, 1.0);

        assert!((nodes[0].velocity - vec2(-5.0, 2.5)).length() < 1e-5);
    }

    #[test]
    fn collide_separates_overlapping_pair_only() {
        let mut nodes = vec![
            node_at(0, 0.0, 0.0),
            node_at(1, 40.0, 0.0),
            node_at(2, 1_000.0, 0.0),
        ];
        let mut collide = CollideForce::new(60.0, 1.0, 1);
        collide.apply(&mut nodes, 0.0);

        assert!((nodes[0].velocity.x + 40.0).abs() < 1e-3);
        assert!((nodes[1].velocity.x - 40.0).abs() < 1e-3);
        assert_eq!(nodes[2].velocity, Vec2::ZERO);
    }
}
