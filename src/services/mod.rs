pub mod account_service;
pub mod auth_client;
pub mod browser_events;
pub mod http;
pub mod navigation;
pub mod scheduler;
pub mod token_store;

pub use account_service::AccountService;
pub use auth_client::{AuthClient, SessionEnder, VerifyOutcome};
pub use browser_events::{ActivityEventSource, BrowserNavigationEvents, DomActivitySource, ACTIVITY_EVENTS};
pub use http::{ApiRequest, ApiResponse, GlooTransport, HttpTransport};
pub use navigation::{BrowserNavigator, NavigationEventSource, NavigationHandlers, Navigator, Notifier};
pub use scheduler::{Clock, GlooScheduler, SystemClock, TaskSpawner, TimerId, TimerScheduler, WasmSpawner};
pub use token_store::{BrowserTokenStore, TokenStore};
