use derive_more::{Deref, Display, From, Into};

/// Virtual adapter index. The wheel's adapter is circular, so positions walk past zero freely and
/// are mapped onto real items with [`AdapterPosition::wrap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, Deref, From, Into)]
pub struct AdapterPosition(i64);

impl AdapterPosition {
    pub fn new(position: i64) -> Self {
        Self(position)
    }

    pub fn previous(self) -> Self {
        self.offset(-1)
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    // saturates at the ends of the i64 range
    pub fn offset(self, by: i64) -> Self {
        Self(self.0.saturating_add(by))
    }

    pub fn wrap(self, item_count: usize) -> Option<usize> {
        (item_count > 0).then(|| self.0.rem_euclid(item_count as i64) as usize)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorLayoutParams {
    pub angle_position_rad: f64,
    pub adapter_position: AdapterPosition,
}

impl SectorLayoutParams {
    pub fn new(adapter_position: AdapterPosition, angle_position_rad: f64) -> Self {
        Self {
            angle_position_rad,
            adapter_position,
        }
    }
}

#[derive(Debug)]
pub struct Sector<V> {
    pub view: V,
    pub params: SectorLayoutParams,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub child_pos: AdapterPosition,
    pub layout_angle_rad: f64,
    pub layouted_children_count: usize,
}

impl LayoutCursor {
    pub fn new(child_pos: AdapterPosition, layout_angle_rad: f64) -> Self {
        Self {
            child_pos,
            layout_angle_rad,
            layouted_children_count: 0,
        }
    }

    pub(crate) fn advance(&mut self, sector_angle_rad: f64) {
        self.layout_angle_rad -= sector_angle_rad;
        self.child_pos = self.child_pos.previous();
        self.layouted_children_count += 1;
    }
}

/// Sectors are ordered from the layout start edge (highest angle) to the end edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachAt {
    StartEdge,
    EndEdge,
}
