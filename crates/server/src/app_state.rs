use frame_api::FrameContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) frame: FrameContext,
}
