use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::domain::{ConsentField, SectionKey, SectionPayload};
use super::payment::{ModalDocument, PaymentError, PaymentWidgetConfig};
use super::review::ReviewSummary;
use super::session::{
    next_session_id, NavigationRequest, NavigationView, PaymentView, PortalSession, SessionId,
    SessionView,
};
use super::validation::ValidationRuleset;
use crate::config::PortalConfig;

type Session = PortalSession<ModalDocument>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ConsentRequest {
    pub field: ConsentField,
    pub value: bool,
}

/// In-memory registry of wizard sessions, one payment modal document per session.
pub struct PortalService {
    ruleset: ValidationRuleset,
    payment: PaymentWidgetConfig,
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl PortalService {
    pub fn new(config: PortalConfig) -> Self {
        Self::with_ruleset(ValidationRuleset::for_version(config.ruleset), config.payment)
    }

    pub fn with_ruleset(ruleset: ValidationRuleset, payment: PaymentWidgetConfig) -> Self {
        Self {
            ruleset,
            payment,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn ruleset(&self) -> &ValidationRuleset {
        &self.ruleset
    }

    pub fn payment_config(&self) -> &PaymentWidgetConfig {
        &self.payment
    }

    pub fn session_count(&self) -> usize {
        self.lock_sessions().len()
    }

    pub fn create(&self) -> SessionView {
        let session = PortalSession::new(
            next_session_id(),
            self.ruleset.clone(),
            ModalDocument::new(),
            self.payment.clone(),
        );
        let view = session.view();
        self.lock_sessions().insert(session.id().clone(), session);
        view
    }

    pub fn get(&self, id: &SessionId) -> Result<SessionView, PortalServiceError> {
        self.with_session(id, |session| Ok(session.view()))
    }

    /// Removes the session; any open payment widget is torn down with it.
    pub fn discard(&self, id: &SessionId) -> Result<(), PortalServiceError> {
        let removed = self.lock_sessions().remove(id);
        match removed {
            Some(session) => {
                drop(session);
                info!(session = %id, "wizard session discarded");
                Ok(())
            }
            None => Err(PortalServiceError::SessionNotFound(id.clone())),
        }
    }

    pub fn update_section(
        &self,
        id: &SessionId,
        section: &str,
        body: Value,
    ) -> Result<SessionView, PortalServiceError> {
        let key = SectionKey::parse(section)
            .ok_or_else(|| PortalServiceError::UnknownSection(section.to_string()))?;
        let payload = SectionPayload::from_json(key, body)
            .map_err(|source| PortalServiceError::InvalidPayload {
                section: key,
                source,
            })?;

        self.with_session(id, |session| {
            session.update_section(payload);
            Ok(session.view())
        })
    }

    pub fn navigate(
        &self,
        id: &SessionId,
        request: NavigationRequest,
    ) -> Result<NavigationView, PortalServiceError> {
        self.with_session(id, |session| {
            let transition = session.navigate(request);
            Ok(NavigationView {
                transition,
                session: session.view(),
            })
        })
    }

    pub fn set_consent(
        &self,
        id: &SessionId,
        request: ConsentRequest,
    ) -> Result<SessionView, PortalServiceError> {
        self.with_session(id, |session| {
            session.set_consent(request.field, request.value);
            Ok(session.view())
        })
    }

    /// Finalizes through the review screen; refused while consent is incomplete.
    pub fn finalize(&self, id: &SessionId) -> Result<SessionView, PortalServiceError> {
        self.with_session(id, |session| {
            if !session.request_finalize()? {
                warn!(session = %id, "finalize refused: consent incomplete");
                return Err(PortalServiceError::ConsentIncomplete);
            }
            Ok(session.view())
        })
    }

    pub fn review(&self, id: &SessionId) -> Result<ReviewSummary, PortalServiceError> {
        self.with_session(id, |session| Ok(session.review_summary()))
    }

    pub fn mount_payment_container(&self, id: &SessionId) -> Result<PaymentView, PortalServiceError> {
        self.with_session(id, |session| {
            session.mount_payment_container();
            Ok(session.payment_view())
        })
    }

    pub fn payment(&self, id: &SessionId) -> Result<PaymentView, PortalServiceError> {
        self.with_session(id, |session| Ok(session.payment_view()))
    }

    pub fn close_payment(&self, id: &SessionId) -> Result<PaymentView, PortalServiceError> {
        self.with_session(id, |session| {
            session.close_payment_modal();
            Ok(session.payment_view())
        })
    }

    fn lock_sessions(&self) -> MutexGuard<'_, HashMap<SessionId, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_session<T, F>(&self, id: &SessionId, f: F) -> Result<T, PortalServiceError>
    where
        F: FnOnce(&mut Session) -> Result<T, PortalServiceError>,
    {
        let mut sessions = self.lock_sessions();
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| PortalServiceError::SessionNotFound(id.clone()))?;
        f(session)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PortalServiceError {
    #[error("session {0} not found")]
    SessionNotFound(SessionId),
    #[error("unknown section '{0}'")]
    UnknownSection(String),
    #[error("invalid {section} payload: {source}")]
    InvalidPayload {
        section: SectionKey,
        #[source]
        source: serde_json::Error,
    },
    #[error("required consent declarations have not been accepted")]
    ConsentIncomplete,
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl PortalServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PortalServiceError::SessionNotFound(_) | PortalServiceError::UnknownSection(_) => {
                StatusCode::NOT_FOUND
            }
            PortalServiceError::InvalidPayload { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            PortalServiceError::ConsentIncomplete => StatusCode::CONFLICT,
            PortalServiceError::Payment(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
