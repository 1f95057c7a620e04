pub mod connectivity;
pub mod notification;
pub mod state;
pub mod view;

pub use connectivity::{Connectivity, ConnectivityFlag};
pub use notification::{Notification, Notifier, Severity};
pub use state::{ApplyOutcome, SessionPhase, SessionStore};
pub use view::SessionView;
