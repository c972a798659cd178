//! 用户与认证响应

use serde::{Deserialize, Serialize};

/// 已登录用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// POST /auth/login 与 /auth/register 的响应
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

/// POST /auth/register 请求体
#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_ignores_extra_fields() {
        let json = r#"{
            "access_token": "abc",
            "token_type": "bearer",
            "user": {"id": "1", "email": "ana@example.com", "name": "Ana"}
        }"#;
        let resp: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access_token, "abc");
        assert_eq!(resp.user.name, "Ana");
    }
}
