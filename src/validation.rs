//! Structural validation for computed link sets.
//!
//! Checks the combinatorial invariants a link computation must uphold:
//! the clusters partition the brain points, every IO point is assigned to
//! exactly one cluster, and every link references a real cluster. Useful
//! for debugging, testing, and catching geometry issues.

use crate::LinkOutput;

/// Detailed validation report for a [`LinkOutput`].
#[derive(Debug, Clone, Default)]
pub struct LinkValidationReport {
    /// Number of clusters in the output.
    pub num_clusters: usize,
    /// Number of brain-to-brain links.
    pub num_brain_links: usize,
    /// Number of IO links.
    pub num_io_links: usize,

    /// Brain indices appearing in no cluster.
    pub missing_points: usize,
    /// Brain indices appearing in more than one cluster.
    pub repeated_points: usize,
    /// Cluster member indices outside the brain slice.
    pub out_of_range_members: usize,

    /// IO indices with no link.
    pub unassigned_io: usize,
    /// IO indices with more than one link.
    pub multiply_assigned_io: usize,

    /// Brain links referencing a cluster index that does not exist.
    pub dangling_brain_links: usize,
    /// Brain links connecting a cluster to itself.
    pub self_brain_links: usize,
    /// IO links referencing a cluster or IO index that does not exist.
    pub dangling_io_links: usize,
}

impl LinkValidationReport {
    /// True when every invariant holds.
    pub fn is_valid(&self) -> bool {
        self.missing_points == 0
            && self.repeated_points == 0
            && self.out_of_range_members == 0
            && self.unassigned_io == 0
            && self.multiply_assigned_io == 0
            && self.dangling_brain_links == 0
            && self.self_brain_links == 0
            && self.dangling_io_links == 0
    }

    /// Format a summary of any issues found.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            return "Valid".to_string();
        }

        let mut issues = Vec::new();
        if self.missing_points > 0 {
            issues.push(format!("{} brain points in no cluster", self.missing_points));
        }
        if self.repeated_points > 0 {
            issues.push(format!(
                "{} brain points in multiple clusters",
                self.repeated_points
            ));
        }
        if self.out_of_range_members > 0 {
            issues.push(format!(
                "{} out-of-range cluster members",
                self.out_of_range_members
            ));
        }
        if self.unassigned_io > 0 {
            issues.push(format!("{} unassigned IO points", self.unassigned_io));
        }
        if self.multiply_assigned_io > 0 {
            issues.push(format!(
                "{} multiply assigned IO points",
                self.multiply_assigned_io
            ));
        }
        if self.dangling_brain_links > 0 {
            issues.push(format!("{} dangling brain links", self.dangling_brain_links));
        }
        if self.self_brain_links > 0 {
            issues.push(format!("{} self brain links", self.self_brain_links));
        }
        if self.dangling_io_links > 0 {
            issues.push(format!("{} dangling IO links", self.dangling_io_links));
        }
        issues.join(", ")
    }
}

/// Validate `output` against the brain and IO counts it was computed from.
pub fn validate(output: &LinkOutput, num_brains: usize, num_io: usize) -> LinkValidationReport {
    let mut report = LinkValidationReport {
        num_clusters: output.clusters.len(),
        num_brain_links: output.brain_links.len(),
        num_io_links: output.io_links.len(),
        ..Default::default()
    };

    let mut membership = vec![0usize; num_brains];
    for cluster in &output.clusters {
        for &m in &cluster.members {
            if m >= num_brains {
                report.out_of_range_members += 1;
            } else {
                membership[m] += 1;
            }
        }
    }
    report.missing_points = membership.iter().filter(|&&c| c == 0).count();
    report.repeated_points = membership.iter().filter(|&&c| c > 1).count();

    let mut io_counts = vec![0usize; num_io];
    for link in &output.io_links {
        if link.cluster >= output.clusters.len() || link.io >= num_io {
            report.dangling_io_links += 1;
        } else {
            io_counts[link.io] += 1;
        }
    }
    report.unassigned_io = io_counts.iter().filter(|&&c| c == 0).count();
    report.multiply_assigned_io = io_counts.iter().filter(|&&c| c > 1).count();

    for link in &output.brain_links {
        if link.a >= output.clusters.len() || link.b >= output.clusters.len() {
            report.dangling_brain_links += 1;
        } else if link.a == link.b {
            report.self_brain_links += 1;
        }
    }

    report
}
