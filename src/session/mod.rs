//! 登录会话
//!
//! 持有当前用户和 token，负责 restore / login / register / logout。
//! token 一旦被采用就写进 API client，之后所有请求都会带上；logout 立即移除。
//!
//! 每个远程操作都拆成两步：发请求（可以放在后台线程）和 `finish_*` 把结果合并回状态，
//! 同步版本（`login` 等）只是把两步串起来。

use crate::api::TodoApi;
use crate::error::ApiError;
use crate::model::{AuthResponse, User};
use crate::notice::Notices;
use crate::storage::token::TokenStore;

pub struct Session<A, S> {
    api: A,
    store: S,
    user: Option<User>,
    loading: bool,
}

impl<A: TodoApi, S: TokenStore> Session<A, S> {
    /// 新会话，处于 loading 状态直到 restore 结束
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            user: None,
            loading: true,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[cfg(test)]
    pub fn token(&self) -> Option<&str> {
        self.api.token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.api.token().is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // ========== Restore ==========

    /// 取出待校验的 token；没有保存的 token 时直接结束 loading
    pub fn begin_restore(&mut self) -> Option<String> {
        let token = self.store.load();
        if token.is_none() {
            self.loading = false;
        }
        token
    }

    /// 合并 `GET /auth/me` 的结果
    pub fn finish_restore(&mut self, token: String, result: Result<User, ApiError>) -> bool {
        self.loading = false;
        match result {
            Ok(user) => {
                tracing::info!(user = %user.email, "session restored");
                self.api.set_token(Some(token));
                self.user = Some(user);
                true
            }
            Err(e) => {
                if e.is_unauthorized() {
                    tracing::info!("stored token expired, discarding");
                } else {
                    tracing::warn!(error = %e, "could not validate stored token, discarding");
                }
                if let Err(e) = self.store.clear() {
                    tracing::warn!(error = %e, "failed to remove stored token");
                }
                self.api.set_token(None);
                self.user = None;
                false
            }
        }
    }

    /// 启动时恢复会话，返回是否已登录
    pub fn restore(&mut self) -> bool {
        let Some(token) = self.begin_restore() else {
            return false;
        };
        let mut probe = self.api.clone();
        probe.set_token(Some(token.clone()));
        let result = probe.me();
        self.finish_restore(token, result)
    }

    // ========== Login / Register ==========

    pub fn login(
        &mut self,
        email: &str,
        password: &str,
        notices: &mut Notices,
    ) -> Result<(), ApiError> {
        let result = self.api.login(email, password);
        self.finish_login(result, notices)
    }

    pub fn finish_login(
        &mut self,
        result: Result<AuthResponse, ApiError>,
        notices: &mut Notices,
    ) -> Result<(), ApiError> {
        match result {
            Ok(resp) => {
                let name = resp.user.name.clone();
                self.adopt(resp);
                notices.success(format!("Welcome, {}!", name));
                Ok(())
            }
            Err(e) => {
                tracing::info!(error = %e, "login failed");
                notices.error(e.user_message("Login failed"));
                Err(e)
            }
        }
    }

    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
        notices: &mut Notices,
    ) -> Result<(), ApiError> {
        let result = self.api.register(email, password, name);
        self.finish_register(result, notices)
    }

    pub fn finish_register(
        &mut self,
        result: Result<AuthResponse, ApiError>,
        notices: &mut Notices,
    ) -> Result<(), ApiError> {
        match result {
            Ok(resp) => {
                self.adopt(resp);
                notices.success("Account created");
                Ok(())
            }
            Err(e) => {
                tracing::info!(error = %e, "registration failed");
                notices.error(e.user_message("Registration failed"));
                Err(e)
            }
        }
    }

    fn adopt(&mut self, resp: AuthResponse) {
        if let Err(e) = self.store.save(&resp.access_token) {
            tracing::warn!(error = %e, "failed to persist token");
        }
        tracing::info!(user = %resp.user.email, "signed in");
        self.api.set_token(Some(resp.access_token));
        self.user = Some(resp.user);
        self.loading = false;
    }

    // ========== Logout ==========

    /// 清除 token 和用户，不访问服务端
    pub fn logout(&mut self, notices: &mut Notices) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to remove stored token");
        }
        self.api.set_token(None);
        if let Some(user) = self.user.take() {
            tracing::info!(user = %user.email, "signed out");
        }
        notices.success("Signed out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::notice::NoticeLevel;
    use crate::storage::token::MemoryTokenStore;

    fn api() -> FakeApi {
        FakeApi::new().with_account("ana@example.com", "s3cret", "Ana")
    }

    #[test]
    fn test_restore_without_token() {
        let store = MemoryTokenStore::new();
        let fake = api();
        let mut session = Session::new(fake.clone(), store);
        assert!(session.is_loading());

        assert!(!session.restore());
        assert!(!session.is_loading());
        assert!(!session.is_authenticated());
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn test_restore_with_valid_token() {
        let store = MemoryTokenStore::with_token("tok-9");
        let fake = api().with_token("tok-9", "ana@example.com");
        let mut session = Session::new(fake.clone(), store.clone());

        assert!(session.restore());
        assert!(!session.is_loading());
        assert_eq!(session.user().unwrap().name, "Ana");
        assert_eq!(session.token(), Some("tok-9"));
        assert_eq!(fake.calls()[0].op, "me");
        assert_eq!(fake.calls()[0].token.as_deref(), Some("tok-9"));
        assert_eq!(store.load().as_deref(), Some("tok-9"));
    }

    #[test]
    fn test_restore_with_rejected_token_discards_it() {
        let store = MemoryTokenStore::with_token("expired");
        let fake = api();
        let mut session = Session::new(fake, store.clone());

        assert!(!session.restore());
        assert!(!session.is_loading());
        assert!(session.user().is_none());
        assert!(session.token().is_none());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_restore_network_failure_discards_token() {
        let store = MemoryTokenStore::with_token("tok-9");
        let fake = api().with_token("tok-9", "ana@example.com");
        fake.fail_next("me", ApiError::Transport("connection refused".into()));
        let mut session = Session::new(fake, store.clone());

        assert!(!session.restore());
        assert_eq!(store.load(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_success() {
        let store = MemoryTokenStore::new();
        let fake = api();
        let mut session = Session::new(fake.clone(), store.clone());
        let mut notices = Notices::new();

        session
            .login("ana@example.com", "s3cret", &mut notices)
            .unwrap();

        assert!(session.is_authenticated());
        assert!(!session.is_loading());
        let token = session.token().unwrap().to_string();
        assert_eq!(store.load(), Some(token.clone()));
        assert_eq!(notices.last().unwrap().message, "Welcome, Ana!");

        // 之后的请求带上 token
        session.api().list_todos().unwrap();
        assert_eq!(fake.calls().last().unwrap().token, Some(token));
    }

    #[test]
    fn test_login_failure_notifies_detail_and_returns_error() {
        let store = MemoryTokenStore::new();
        let mut session = Session::new(api(), store.clone());
        let mut notices = Notices::new();

        let err = session
            .login("ana@example.com", "wrong", &mut notices)
            .unwrap_err();
        assert!(err.is_unauthorized());
        let notice = notices.last().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Incorrect email or password");
        assert!(!session.is_authenticated());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_login_failure_without_detail_uses_fallback() {
        let fake = api();
        fake.fail_next("login", ApiError::Transport("dns".into()));
        let mut session = Session::new(fake, MemoryTokenStore::new());
        let mut notices = Notices::new();

        assert!(session.login("ana@example.com", "s3cret", &mut notices).is_err());
        assert_eq!(notices.last().unwrap().message, "Login failed");
    }

    #[test]
    fn test_register() {
        let store = MemoryTokenStore::new();
        let mut session = Session::new(api(), store.clone());
        let mut notices = Notices::new();

        session
            .register("bo@example.com", "pw", "Bo", &mut notices)
            .unwrap();
        assert_eq!(session.user().unwrap().name, "Bo");
        assert!(store.load().is_some());
        assert_eq!(notices.last().unwrap().message, "Account created");

        let err = session
            .register("ana@example.com", "pw", "Ana", &mut notices)
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
        assert_eq!(notices.last().unwrap().message, "Email already registered");
    }

    #[test]
    fn test_logout_clears_token_and_header() {
        let store = MemoryTokenStore::new();
        let fake = api();
        let mut session = Session::new(fake.clone(), store.clone());
        let mut notices = Notices::new();
        session
            .login("ana@example.com", "s3cret", &mut notices)
            .unwrap();

        session.logout(&mut notices);

        assert_eq!(store.load(), None);
        assert!(session.user().is_none());
        assert!(session.token().is_none());
        assert_eq!(notices.last().unwrap().message, "Signed out");

        let err = session.api().list_todos().unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(fake.calls().last().unwrap().token, None);
    }
}
