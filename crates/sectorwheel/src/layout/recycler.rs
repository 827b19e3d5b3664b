use super::model::{AdapterPosition, SectorLayoutParams};

pub trait SectorView {
    /// Called on placement and after every rotation so the view can reposition itself.
    fn on_layout_params_changed(&mut self, params: &SectorLayoutParams);
}

pub trait SectorRecycler {
    type View: SectorView;

    fn acquire(&mut self, position: AdapterPosition) -> Self::View;

    fn release(&mut self, view: Self::View);
}
