//! Text-only recycler and view used by the CLI to show what the layout manager decided.

use crate::layout::{AdapterPosition, SectorLayoutParams, SectorRecycler, SectorView};
use std::fmt;
use wheelmath::{AngularRestrictions, ComputationHelper, Point, WheelGeometry};

#[derive(Debug, Clone)]
pub struct PreviewSector {
    pub position: AdapterPosition,
    pub label: String,
    pub angle_rad: f64,
    pub anchor: Point,
    geometry: WheelGeometry,
    helper: ComputationHelper,
}

impl SectorView for PreviewSector {
    fn on_layout_params_changed(&mut self, params: &SectorLayoutParams) {
        self.angle_rad = params.angle_position_rad;
        // the label sits in the middle of the sector, not on its top edge
        self.anchor = self
            .geometry
            .point_at(self.helper.sector_center_angle_rad(self.angle_rad));
    }
}

impl fmt::Display for PreviewSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>6}  {:<16} {:>9.4} rad  ({:>8.1}, {:>8.1})",
            *self.position, self.label, self.angle_rad, self.anchor.x, self.anchor.y
        )
    }
}

#[derive(Debug)]
pub struct PreviewRecycler {
    labels: Vec<String>,
    geometry: WheelGeometry,
    helper: ComputationHelper,
    pool: Vec<PreviewSector>,
    created: usize,
}

impl PreviewRecycler {
    pub fn new(labels: Vec<String>, geometry: WheelGeometry, restrictions: &AngularRestrictions) -> Self {
        Self {
            labels,
            geometry,
            helper: ComputationHelper::from_restrictions(restrictions),
            pool: Vec::new(),
            created: 0,
        }
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    fn label_for(&self, position: AdapterPosition) -> String {
        position
            .wrap(self.labels.len())
            .map(|i| self.labels[i].clone())
            .unwrap_or_default()
    }
}

impl SectorRecycler for PreviewRecycler {
    type View = PreviewSector;

    fn acquire(&mut self, position: AdapterPosition) -> PreviewSector {
        let label = self.label_for(position);
        match self.pool.pop() {
            Some(mut view) => {
                view.position = position;
                view.label = label;
                view
            }
            None => {
                self.created += 1;
                PreviewSector {
                    position,
                    label,
                    angle_rad: 0.0,
                    anchor: self.geometry.center,
                    geometry: self.geometry,
                    helper: self.helper,
                }
            }
        }
    }

    fn release(&mut self, view: PreviewSector) {
        self.pool.push(view);
    }
}
