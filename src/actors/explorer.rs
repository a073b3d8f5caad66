use crate::error::{ExplorerError, Result};
use crate::github::{GitHubClient, RepoPage};
use crate::state::{Notification, PageState, ViewState};
use crate::types::GitHubUser;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort, SpawnErr};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

const SNAPSHOT_TIMEOUT: Duration = Duration::from_secs(5);

/// Owns the view state and sequences the profile and repository fetches.
pub struct ProfileExplorer;

/// Messages the explorer can handle
#[derive(Debug)]
pub enum ProfileExplorerMessage {
    /// Look up a subject, then list its first page of repositories
    LookupSubject(String),
    /// Move the repository listing to another page
    ChangePage(u32),
    /// Flip between light and dark mode
    ToggleTheme,
    /// Read a copy of the current view state
    GetSnapshot(RpcReplyPort<ViewState>),
    /// A profile request finished
    LookupCompleted {
        token: u64,
        query: String,
        result: Result<GitHubUser>,
    },
    /// A repository page request finished
    ListingCompleted {
        token: u64,
        query: String,
        result: Result<RepoPage>,
    },
    /// Stop the explorer
    Shutdown,
}

/// Arguments for starting the explorer
pub struct ProfileExplorerArgs {
    pub client: GitHubClient,
    pub notifications: mpsc::UnboundedSender<Notification>,
}

#[derive(Debug)]
struct PendingListing {
    token: u64,
    // page state to restore if an optimistic page change fails
    rollback: Option<PageState>,
}

/// State for the explorer
pub struct ProfileExplorerState {
    client: GitHubClient,
    notifications: mpsc::UnboundedSender<Notification>,
    view: ViewState,
    // query of the last successful lookup; page changes list this subject
    subject: Option<String>,
    next_token: u64,
    pending_lookup: Option<u64>,
    pending_listing: Option<PendingListing>,
}

impl ProfileExplorerState {
    fn new(args: ProfileExplorerArgs) -> Self {
        Self {
            client: args.client,
            notifications: args.notifications,
            view: ViewState::default(),
            subject: None,
            next_token: 0,
            pending_lookup: None,
            pending_listing: None,
        }
    }

    fn issue_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    fn refresh_loading(&mut self) {
        self.view.loading = self.pending_lookup.is_some() || self.pending_listing.is_some();
    }
}

impl ProfileExplorer {
    /// Spawn the explorer and return a handle plus the notification stream.
    pub async fn spawn_with_client(
        client: GitHubClient,
    ) -> std::result::Result<(ExplorerHandle, mpsc::UnboundedReceiver<Notification>), SpawnErr> {
        let (notifications, receiver) = mpsc::unbounded_channel();
        let args = ProfileExplorerArgs {
            client,
            notifications,
        };

        let (actor, join_handle) = Actor::spawn(None, ProfileExplorer, args).await?;

        info!("Profile explorer started");
        Ok((ExplorerHandle { actor, join_handle }, receiver))
    }

    fn start_lookup(
        myself: &ActorRef<ProfileExplorerMessage>,
        state: &mut ProfileExplorerState,
        query: String,
    ) {
        let token = state.issue_token();
        // The listing on screen stays current until this lookup succeeds.
        state.pending_lookup = Some(token);
        state.view.query = Some(query.clone());
        state.refresh_loading();

        info!(token, query = %query, "Looking up subject");

        let client = state.client.clone();
        let myself = myself.clone();
        tokio::spawn(async move {
            let result = client.get_user(&query).await;
            if let Err(e) = myself.send_message(ProfileExplorerMessage::LookupCompleted {
                token,
                query,
                result,
            }) {
                debug!("Explorer gone before lookup completed: {}", e);
            }
        });
    }

    fn start_listing(
        myself: &ActorRef<ProfileExplorerMessage>,
        state: &mut ProfileExplorerState,
        query: String,
        page: u32,
        rollback: Option<PageState>,
    ) {
        // Supersedes any outstanding listing, whichever operation issued it.
        // A superseded page change still owns the page state from before it.
        let rollback = match state.pending_listing.take() {
            Some(previous) => previous.rollback.or(rollback),
            None => rollback,
        };

        let token = state.issue_token();
        state.pending_listing = Some(PendingListing { token, rollback });
        state.refresh_loading();

        debug!(token, query = %query, page, "Listing repositories");

        let client = state.client.clone();
        let myself = myself.clone();
        tokio::spawn(async move {
            let result = client.list_repositories(&query, page).await;
            if let Err(e) = myself.send_message(ProfileExplorerMessage::ListingCompleted {
                token,
                query,
                result,
            }) {
                debug!("Explorer gone before listing completed: {}", e);
            }
        });
    }

    fn finish_lookup(
        myself: &ActorRef<ProfileExplorerMessage>,
        state: &mut ProfileExplorerState,
        token: u64,
        query: String,
        result: Result<GitHubUser>,
    ) {
        if state.pending_lookup != Some(token) {
            debug!(token, query = %query, "Dropping stale lookup result");
            return;
        }
        state.pending_lookup = None;

        match result {
            Ok(user) => {
                info!(login = %user.login, public_repos = user.public_repos, "Profile fetched");
                state.view.profile = Some(user);
                state.subject = Some(query.clone());
                state.view.touch();
                Self::start_listing(myself, state, query, 1, None);
            }
            Err(e) => {
                warn!(query = %query, "Lookup failed: {}", e);
                let notification = Notification::LookupFailed {
                    query,
                    reason: e.to_string(),
                };
                if state.notifications.send(notification).is_err() {
                    debug!("No notification listener attached");
                }
            }
        }

        state.refresh_loading();
    }

    fn finish_listing(
        state: &mut ProfileExplorerState,
        token: u64,
        query: String,
        result: Result<RepoPage>,
    ) {
        let pending = match state.pending_listing.take() {
            Some(pending) if pending.token == token => pending,
            other => {
                state.pending_listing = other;
                debug!(token, query = %query, "Dropping stale listing result");
                return;
            }
        };

        match result {
            Ok(page) => {
                info!(
                    query = %query,
                    page = page.page,
                    total_pages = page.total_pages,
                    count = page.repos.len(),
                    "Repository page fetched"
                );
                state.view.repositories = page.repos;
                state.view.page.current_page = page.page;
                state.view.page.total_pages = page.total_pages;
                state.view.touch();
            }
            Err(e) => {
                warn!(query = %query, "Repository listing failed: {}", e);
                if let Some(previous) = pending.rollback {
                    state.view.page = previous;
                }
            }
        }

        state.refresh_loading();
    }
}

#[ractor::async_trait]
impl Actor for ProfileExplorer {
    type Msg = ProfileExplorerMessage;
    type State = ProfileExplorerState;
    type Arguments = ProfileExplorerArgs;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> std::result::Result<Self::State, ActorProcessingErr> {
        debug!("Starting profile explorer");
        Ok(ProfileExplorerState::new(args))
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> std::result::Result<(), ActorProcessingErr> {
        match message {
            ProfileExplorerMessage::LookupSubject(query) => {
                Self::start_lookup(&myself, state, query);
            }

            ProfileExplorerMessage::ChangePage(page) => match state.subject.clone() {
                Some(subject) => {
                    let previous = state.view.page;
                    state.view.page.current_page = page;
                    Self::start_listing(&myself, state, subject, page, Some(previous));
                }
                None => {
                    warn!(page, "Ignoring page change, no subject has been looked up");
                }
            },

            ProfileExplorerMessage::ToggleTheme => {
                state.view.theme = state.view.theme.toggled();
                debug!(theme = ?state.view.theme, "Theme toggled");
            }

            ProfileExplorerMessage::GetSnapshot(reply) => {
                if !reply.is_closed() {
                    let _ = reply.send(state.view.clone());
                }
            }

            ProfileExplorerMessage::LookupCompleted {
                token,
                query,
                result,
            } => {
                Self::finish_lookup(&myself, state, token, query, result);
            }

            ProfileExplorerMessage::ListingCompleted {
                token,
                query,
                result,
            } => {
                Self::finish_listing(state, token, query, result);
            }

            ProfileExplorerMessage::Shutdown => {
                info!("Shutting down profile explorer");
                myself.stop(Some("Shutdown requested".to_string()));
            }
        }

        Ok(())
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> std::result::Result<(), ActorProcessingErr> {
        info!(
            outstanding = state.view.loading,
            "Profile explorer stopped"
        );
        Ok(())
    }
}

/// Front door for the rendering side: sends intents, reads snapshots.
pub struct ExplorerHandle {
    actor: ActorRef<ProfileExplorerMessage>,
    join_handle: JoinHandle<()>,
}

impl ExplorerHandle {
    fn send(&self, message: ProfileExplorerMessage) -> Result<()> {
        self.actor
            .send_message(message)
            .map_err(|e| ExplorerError::ActorError(format!("Failed to reach explorer: {}", e)))
    }

    pub fn lookup_subject(&self, query: impl Into<String>) -> Result<()> {
        self.send(ProfileExplorerMessage::LookupSubject(query.into()))
    }

    pub fn change_page(&self, page: u32) -> Result<()> {
        self.send(ProfileExplorerMessage::ChangePage(page))
    }

    pub fn toggle_theme(&self) -> Result<()> {
        self.send(ProfileExplorerMessage::ToggleTheme)
    }

    pub async fn snapshot(&self) -> Result<ViewState> {
        match self
            .actor
            .call(ProfileExplorerMessage::GetSnapshot, Some(SNAPSHOT_TIMEOUT))
            .await
        {
            Ok(ractor::rpc::CallResult::Success(view)) => Ok(view),
            Ok(ractor::rpc::CallResult::Timeout) => Err(ExplorerError::ActorError(
                "Timeout reading view state".to_string(),
            )),
            Ok(ractor::rpc::CallResult::SenderError) => Err(ExplorerError::ActorError(
                "Explorer dropped the snapshot request".to_string(),
            )),
            Err(e) => Err(ExplorerError::ActorError(format!(
                "Failed to request snapshot: {}",
                e
            ))),
        }
    }

    /// Poll snapshots until no request is outstanding.
    pub async fn settled(&self, poll: Duration) -> Result<ViewState> {
        loop {
            let view = self.snapshot().await?;
            if !view.loading {
                return Ok(view);
            }
            tokio::time::sleep(poll).await;
        }
    }

    pub async fn shutdown(self) -> Result<()> {
        self.send(ProfileExplorerMessage::Shutdown)?;
        if let Err(e) = self.join_handle.await {
            error!("Explorer task ended abnormally: {}", e);
        }
        Ok(())
    }
}
