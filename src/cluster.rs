//! Greedy, center-driven hotspot detection over region catalogs.
//!
//! Candidate centers are processed in descending order of total potential
//! (ties broken by name) and claim every unclaimed qualifying region within
//! the search radius. Clusters are therefore disjoint by construction, and
//! the ordering rule keeps results reproducible even though greedy assignment
//! is order-dependent when a region sits near two candidate centers.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::distance::{DistanceMetric, distance_km};
use crate::error::{Result, SitioError};
use crate::types::{EngineConfig, Hotspot, Region};
use crate::validation::validate_point;

/// Parameters for a hotspot detection run.
#[derive(Debug, Clone, Copy)]
pub struct ClusterParams {
    /// Great-circle search radius around each candidate center, inclusive.
    pub radius_km: f64,
    /// Minimum member count (center included) for a cluster to be emitted.
    pub min_cluster_size: usize,
    /// Minimum total potential for a region to participate at all.
    pub min_potential: f64,
}

impl ClusterParams {
    fn validate(&self) -> Result<()> {
        if !self.radius_km.is_finite() || self.radius_km <= 0.0 {
            return Err(SitioError::InvalidInput(format!(
                "radius_km must be positive, got: {}",
                self.radius_km
            )));
        }
        if self.min_cluster_size < 2 {
            return Err(SitioError::InvalidInput(format!(
                "min_cluster_size must be >= 2, got: {}",
                self.min_cluster_size
            )));
        }
        if !self.min_potential.is_finite() {
            return Err(SitioError::InvalidInput(format!(
                "min_potential must be finite, got: {}",
                self.min_potential
            )));
        }
        Ok(())
    }
}

/// Detects multi-region hotspots ranked by aggregate potential.
pub struct HotspotClusterer {
    metric: DistanceMetric,
    scale_normalization: f64,
}

impl HotspotClusterer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            metric: config.metric,
            scale_normalization: config.scale_normalization,
        }
    }

    /// Run hotspot detection over the given regions.
    ///
    /// Returns an empty list when fewer than `min_cluster_size` regions meet
    /// the potential floor; that is an expected "no hotspots found" result,
    /// not an error. Isolated regions that never reach cluster size are
    /// simply absent from the output.
    ///
    /// # Errors
    ///
    /// Rejects invalid parameters (`radius_km <= 0`, `min_cluster_size < 2`)
    /// and region centroids outside geographic range.
    pub fn detect_hotspots(
        &self,
        regions: &[Region],
        params: &ClusterParams,
    ) -> Result<Vec<Hotspot>> {
        params.validate()?;
        for region in regions {
            validate_point(&region.centroid).map_err(|_| {
                SitioError::InvalidInput(format!(
                    "Region '{}' has an out-of-range centroid",
                    region.name
                ))
            })?;
        }

        let criteria_order = catalog_criteria_order(regions);

        // Qualifying regions, most promising centers first
        let mut candidates: Vec<&Region> = regions
            .iter()
            .filter(|r| r.total_potential() >= params.min_potential)
            .collect();
        if candidates.len() < params.min_cluster_size {
            log::debug!(
                "Hotspot detection: only {} of {} regions meet the potential floor",
                candidates.len(),
                regions.len()
            );
            return Ok(Vec::new());
        }
        candidates.sort_by(|a, b| {
            b.total_potential()
                .partial_cmp(&a.total_potential())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });

        let mut claimed: FxHashSet<&str> = FxHashSet::default();
        let mut hotspots = Vec::new();

        for &center in &candidates {
            if claimed.contains(center.name.as_str()) {
                continue;
            }

            // Unclaimed qualifying neighbors within radius, nearest first
            let mut members: Vec<(&Region, f64)> = candidates
                .iter()
                .filter(|r| r.name != center.name)
                .filter(|r| !claimed.contains(r.name.as_str()))
                .filter_map(|r| {
                    let dist = distance_km(&center.centroid, &r.centroid, self.metric);
                    (dist <= params.radius_km).then_some((*r, dist))
                })
                .collect();
            members.sort_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.0.name.cmp(&b.0.name))
            });
            members.insert(0, (center, 0.0));

            if members.len() < params.min_cluster_size {
                continue;
            }

            let hotspot = self.build_hotspot(center, &members, params, &criteria_order);
            for (member, _) in &members {
                claimed.insert(member.name.as_str());
            }
            hotspots.push(hotspot);
        }

        hotspots.sort_by(|a, b| {
            b.total_potential
                .partial_cmp(&a.total_potential)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for (i, hotspot) in hotspots.iter_mut().enumerate() {
            hotspot.id = (i + 1) as u32;
        }

        log::info!(
            "Hotspot detection: {} cluster(s) from {} qualifying region(s)",
            hotspots.len(),
            candidates.len()
        );
        Ok(hotspots)
    }

    fn build_hotspot(
        &self,
        center: &Region,
        members: &[(&Region, f64)],
        params: &ClusterParams,
        criteria_order: &[String],
    ) -> Hotspot {
        let member_count = members.len();
        let total_potential: f64 = members.iter().map(|(r, _)| r.total_potential()).sum();
        let cluster_radius_km = members.last().map_or(0.0, |(_, d)| *d);

        let contributions = summed_contributions(members, criteria_order);
        let dominant_criteria = dominant_criteria(&contributions, criteria_order);

        let synergy_score = self.synergy_score(
            members,
            params.radius_km,
            total_potential,
            &contributions,
            criteria_order.len(),
        );

        Hotspot {
            // Reassigned once the full list is ranked
            id: 0,
            center: center.name.clone(),
            members: members.iter().map(|(r, _)| r.name.clone()).collect(),
            member_count,
            total_potential,
            avg_potential: total_potential / member_count as f64,
            cluster_radius_km,
            synergy_score,
            dominant_criteria,
        }
    }

    /// Weighted average of four sub-scores, each normalized to [0, 1].
    fn synergy_score(
        &self,
        members: &[(&Region, f64)],
        radius_km: f64,
        total_potential: f64,
        contributions: &[f64],
        total_criteria: usize,
    ) -> f64 {
        let size_score = (members.len() as f64 / 10.0).min(1.0);

        // Center excluded: its distance is 0 by definition
        let non_center = &members[1..];
        let avg_distance =
            non_center.iter().map(|(_, d)| d).sum::<f64>() / non_center.len() as f64;
        let compactness_score = ((radius_km - avg_distance) / radius_km).max(0.0);

        let present = contributions.iter().filter(|&&c| c > 0.0).count();
        let diversity_score = if total_criteria == 0 {
            0.0
        } else {
            present as f64 / total_criteria as f64
        };

        let scale_score = (total_potential / self.scale_normalization).min(1.0);

        0.25 * size_score + 0.25 * compactness_score + 0.25 * diversity_score + 0.25 * scale_score
    }
}

/// Criterion names in first-appearance order across the catalog.
fn catalog_criteria_order(regions: &[Region]) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut order = Vec::new();
    for region in regions {
        for criterion in &region.criteria {
            if seen.insert(criterion.name.as_str()) {
                order.push(criterion.name.clone());
            }
        }
    }
    order
}

/// Per-criterion potential summed across cluster members, aligned with the
/// catalog criteria order.
fn summed_contributions(members: &[(&Region, f64)], criteria_order: &[String]) -> Vec<f64> {
    let position: FxHashMap<&str, usize> = criteria_order
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut totals = vec![0.0; criteria_order.len()];
    for (region, _) in members {
        for criterion in &region.criteria {
            if let Some(&i) = position.get(criterion.name.as_str()) {
                totals[i] += criterion.potential;
            }
        }
    }
    totals
}

/// Top criteria by summed contribution: positive only, at most three, ties
/// broken by declaration order.
fn dominant_criteria(contributions: &[f64], criteria_order: &[String]) -> Vec<String> {
    let mut ranked: SmallVec<[(usize, f64); 16]> = contributions
        .iter()
        .enumerate()
        .filter(|&(_, &total)| total > 0.0)
        .map(|(i, &total)| (i, total))
        .collect();
    // Stable sort keeps declaration order among equal contributions
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .iter()
        .take(3)
        .map(|&(i, _)| criteria_order[i].clone())
        .collect()
}
