use log::{info, warn};
use std::sync::Arc;

use crate::application::dtos::{
    ChangePasswordRequest, CurrentUserDto, LoginRequest, RefreshRequest, RegisterRequest,
    TokenResponse,
};
use crate::application::ResultExt;
use researchpilot_domain::shared::{Clock, DomainError};
use researchpilot_domain::subscription::{Subscription, SubscriptionRepository};
use researchpilot_domain::user::{validate_password, Email, NewUser, User, UserRepository};
use researchpilot_infrastructure::security::{PasswordService, TokenKind, TokenPair, TokenService};

const INVALID_LOGIN: &str = "Incorrect email or password";

/// Registration, login and bearer-token handling.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    passwords: PasswordService,
    tokens: TokenService,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        passwords: PasswordService,
        tokens: TokenService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            subscriptions,
            passwords,
            tokens,
            clock,
        }
    }

    /// Create the account with a trial subscription and sign it in.
    pub async fn register(&self, request: RegisterRequest) -> Result<TokenResponse, DomainError> {
        let email = Email::parse(&request.email)?;
        validate_password(&request.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("Email already registered".to_string()));
        }

        let hash = self.passwords.hash(&request.password).to_infra_err()?;
        let now = self.clock.now();
        let user = self
            .users
            .create(&NewUser::new(email, request.name, hash, now)?)
            .await?;

        self.subscriptions
            .save(&Subscription::trial(user.id(), now))
            .await?;

        info!("Registered user {} ({})", user.id(), user.email().as_str());
        self.issue(&user)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, DomainError> {
        let invalid = || DomainError::InvalidCredentials(INVALID_LOGIN.to_string());

        let email = Email::parse(&request.email).map_err(|_| invalid())?;
        let Some(user) = self.users.find_by_email(&email).await? else {
            warn!("Login failed: unknown email");
            return Err(invalid());
        };

        if !self
            .passwords
            .verify(&request.password, user.password_hash())
            .to_infra_err()?
        {
            warn!("Login failed for user {}", user.id());
            return Err(invalid());
        }
        user.ensure_active()?;

        self.issue(&user)
    }

    pub async fn refresh(&self, request: RefreshRequest) -> Result<TokenResponse, DomainError> {
        let claims = self
            .tokens
            .verify(&request.refresh_token, TokenKind::Refresh, self.clock.now())
            .map_err(|e| DomainError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .filter(User::is_active)
            .ok_or_else(|| DomainError::Unauthorized("User not found or inactive".to_string()))?;

        self.issue(&user)
    }

    /// Resolve the user behind an access token.
    pub async fn authenticate(&self, access_token: &str) -> Result<User, DomainError> {
        let claims = self
            .tokens
            .verify(access_token, TokenKind::Access, self.clock.now())
            .to_unauthorized()?;

        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| DomainError::Unauthorized("User not found".to_string()))?;
        user.ensure_active()?;

        Ok(user)
    }

    pub async fn me(&self, user: &User) -> Result<CurrentUserDto, DomainError> {
        let subscription = match self.subscriptions.find_by_user(user.id()).await? {
            Some(mut subscription) => {
                if subscription.refresh_expiry(self.clock.now()) {
                    self.subscriptions.save(&subscription).await?;
                }
                Some(subscription)
            }
            None => None,
        };

        Ok(CurrentUserDto {
            id: user.id().value(),
            email: user.email().as_str().to_string(),
            name: user.name().map(String::from),
            is_active: user.is_active(),
            created_at: user.created_at(),
            subscription_plan: subscription.as_ref().map(Subscription::plan),
            subscription_status: subscription.as_ref().map(Subscription::status),
        })
    }

    pub async fn change_password(
        &self,
        mut user: User,
        request: ChangePasswordRequest,
    ) -> Result<(), DomainError> {
        if !self
            .passwords
            .verify(&request.current_password, user.password_hash())
            .to_infra_err()?
        {
            return Err(DomainError::Validation(
                "Current password is incorrect".to_string(),
            ));
        }
        validate_password(&request.new_password)?;

        let hash = self.passwords.hash(&request.new_password).to_infra_err()?;
        user.set_password_hash(hash, self.clock.now());
        self.users.update(&user).await?;

        info!("Password changed for user {}", user.id());
        Ok(())
    }

    fn issue(&self, user: &User) -> Result<TokenResponse, DomainError> {
        let TokenPair {
            access_token,
            refresh_token,
            expires_in,
        } = self
            .tokens
            .issue_pair(user.id(), self.clock.now())
            .to_infra_err()?;

        Ok(TokenResponse {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
            expires_in,
        })
    }
}
