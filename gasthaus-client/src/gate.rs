//! Session-gated access control
//!
//! One probe primitive, two guard variants and the role-derived navigation
//! chrome. Every guard evaluation performs a fresh `auth_check` round-trip:
//! the service is the source of truth, the gate holds no cross-navigation
//! cache, and a revoked or expired session must be detected within one
//! navigation.

use async_trait::async_trait;
use shared::models::Role;

use crate::HttpClient;

/// Authorization decision for one navigation.
///
/// Produced fresh per evaluation and handed to protected views as explicit
/// data; nothing re-derives it from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Anonymous,
    Authenticated { username: String, role: Role },
}

/// Source of session decisions.
///
/// [`HttpClient`] is the production implementation; tests substitute a
/// canned probe.
#[async_trait]
pub trait SessionProbe {
    /// One authenticated round-trip, classified.
    ///
    /// Success with a well-formed body is `Authenticated`; any non-success,
    /// malformed body or network failure is `Anonymous`. Authorization
    /// fails closed.
    async fn check_session(&self) -> AuthDecision;
}

#[async_trait]
impl SessionProbe for HttpClient {
    async fn check_session(&self) -> AuthDecision {
        match self.auth_check().await {
            Ok(info) => AuthDecision::Authenticated {
                username: info.username,
                role: info.role,
            },
            Err(err) => {
                tracing::debug!(error = %err, "session probe failed, treating as anonymous");
                AuthDecision::Anonymous
            }
        }
    }
}

/// Guard A: pages for guests only (login, registration).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestGate {
    /// Render the protected child.
    Render,
    /// Already signed in: go to the account view instead.
    RedirectToAccount,
}

/// Guard B: pages for signed-in members (account, reservations).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberGate {
    /// Render the protected child with the identity as explicit data.
    Render { username: String, role: Role },
    /// Render nothing; any redirect is the page's own business.
    Hidden,
}

/// Admin layer on top of guard B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminGate {
    Render { username: String },
    /// Signed in without the admin role: back to the account view.
    RedirectToAccount,
    Hidden,
}

/// Evaluators for the guard variants.
///
/// Stateless by design: decisions are never cached across navigations.
pub struct AccessGate;

impl AccessGate {
    /// Guard A: deny if logged in.
    pub async fn guest_only(probe: &(impl SessionProbe + ?Sized)) -> GuestGate {
        match probe.check_session().await {
            AuthDecision::Anonymous => GuestGate::Render,
            AuthDecision::Authenticated { .. } => GuestGate::RedirectToAccount,
        }
    }

    /// Guard B: deny if not authenticated.
    pub async fn member_only(probe: &(impl SessionProbe + ?Sized)) -> MemberGate {
        match probe.check_session().await {
            AuthDecision::Authenticated { username, role } => MemberGate::Render { username, role },
            AuthDecision::Anonymous => MemberGate::Hidden,
        }
    }

    /// Guard B plus the admin role layer.
    pub async fn admin_only(probe: &(impl SessionProbe + ?Sized)) -> AdminGate {
        match probe.check_session().await {
            AuthDecision::Authenticated {
                username,
                role: Role::Admin,
            } => AdminGate::Render { username },
            AuthDecision::Authenticated {
                role: Role::User, ..
            } => AdminGate::RedirectToAccount,
            AuthDecision::Anonymous => AdminGate::Hidden,
        }
    }
}

/// Role-derived visibility of the navigation chrome, as data.
///
/// A pure function of the decision; header-like collaborators render from
/// this set (re-evaluated per navigation) instead of sprinkling role
/// conditionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavChrome {
    pub show_register: bool,
    pub show_login: bool,
    pub show_account: bool,
    pub show_admin: bool,
}

impl NavChrome {
    pub fn for_decision(decision: &AuthDecision) -> Self {
        match decision {
            AuthDecision::Anonymous => Self {
                show_register: true,
                show_login: true,
                show_account: false,
                show_admin: false,
            },
            AuthDecision::Authenticated { role, .. } => Self {
                show_register: false,
                show_login: false,
                show_account: !role.is_admin(),
                show_admin: role.is_admin(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedProbe(AuthDecision);

    #[async_trait]
    impl SessionProbe for CannedProbe {
        async fn check_session(&self) -> AuthDecision {
            self.0.clone()
        }
    }

    fn user(name: &str, role: Role) -> AuthDecision {
        AuthDecision::Authenticated {
            username: name.to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_guest_gate() {
        let anonymous = CannedProbe(AuthDecision::Anonymous);
        assert_eq!(AccessGate::guest_only(&anonymous).await, GuestGate::Render);

        let signed_in = CannedProbe(user("lena", Role::User));
        assert_eq!(
            AccessGate::guest_only(&signed_in).await,
            GuestGate::RedirectToAccount
        );
    }

    #[tokio::test]
    async fn test_member_gate_injects_identity() {
        let signed_in = CannedProbe(user("lena", Role::User));
        assert_eq!(
            AccessGate::member_only(&signed_in).await,
            MemberGate::Render {
                username: "lena".to_string(),
                role: Role::User,
            }
        );

        let anonymous = CannedProbe(AuthDecision::Anonymous);
        assert_eq!(AccessGate::member_only(&anonymous).await, MemberGate::Hidden);
    }

    #[tokio::test]
    async fn test_admin_gate_layers_the_role_check() {
        let admin = CannedProbe(user("root", Role::Admin));
        assert_eq!(
            AccessGate::admin_only(&admin).await,
            AdminGate::Render {
                username: "root".to_string(),
            }
        );

        let plain_user = CannedProbe(user("lena", Role::User));
        assert_eq!(
            AccessGate::admin_only(&plain_user).await,
            AdminGate::RedirectToAccount
        );

        let anonymous = CannedProbe(AuthDecision::Anonymous);
        assert_eq!(AccessGate::admin_only(&anonymous).await, AdminGate::Hidden);
    }

    #[test]
    fn test_nav_chrome_per_decision() {
        let anonymous = NavChrome::for_decision(&AuthDecision::Anonymous);
        assert!(anonymous.show_register && anonymous.show_login);
        assert!(!anonymous.show_account && !anonymous.show_admin);

        let member = NavChrome::for_decision(&user("lena", Role::User));
        assert!(member.show_account);
        assert!(!member.show_admin && !member.show_login && !member.show_register);

        let admin = NavChrome::for_decision(&user("root", Role::Admin));
        assert!(admin.show_admin);
        assert!(!admin.show_account && !admin.show_login && !admin.show_register);
    }
}
