use std::time::Duration;
use tracing::trace;

/// Service calls that can carry a simulated delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    GetAll,
    GetById,
    Search,
    FavoritesGetAll,
    FavoriteProperties,
    AddFavorite,
    RemoveFavorite,
    IsFavorite,
    SubmitInquiry,
}

impl Call {
    /// Delay applied when simulation is switched on
    pub fn simulated_delay(self) -> Duration {
        let ms = match self {
            Call::GetAll => 300,
            Call::GetById => 200,
            Call::Search => 400,
            Call::FavoritesGetAll => 250,
            Call::FavoriteProperties => 300,
            Call::AddFavorite | Call::RemoveFavorite => 200,
            Call::IsFavorite => 100,
            Call::SubmitInquiry => 1500,
        };
        Duration::from_millis(ms)
    }
}

/// Injected artificial latency. Purely cosmetic: it never changes a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency {
    enabled: bool,
}

impl Latency {
    /// No delay at all
    pub fn none() -> Self {
        Self { enabled: false }
    }

    /// Per-call delays of a slow mock backend
    pub fn simulated() -> Self {
        Self { enabled: true }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub async fn wait(&self, call: Call) {
        if !self.enabled {
            return;
        }
        let delay = call.simulated_delay();
        trace!(?call, ?delay, "simulating latency");
        tokio::time::sleep(delay).await;
    }
}
