//! 登录 / 注册表单组件

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::ThemeColors;

use super::dialog_utils::{center_dialog, render_dialog_frame, render_hint};

/// 表单模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// 当前输入框
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    #[default]
    Email,
    Password,
    Name,
}

/// 表单数据
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub field: AuthField,
    pub email: String,
    pub password: String,
    pub name: String,
    /// 请求进行中
    pub submitting: bool,
}

impl AuthForm {
    /// 切换登录 / 注册，保留已输入的邮箱
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        if self.mode == AuthMode::Login && self.field == AuthField::Name {
            self.field = AuthField::Email;
        }
    }

    /// 下一个输入框（登录模式跳过 Name）
    pub fn next_field(&mut self) {
        self.field = match (self.mode, self.field) {
            (_, AuthField::Email) => AuthField::Password,
            (AuthMode::Login, AuthField::Password) => AuthField::Email,
            (AuthMode::Register, AuthField::Password) => AuthField::Name,
            (_, AuthField::Name) => AuthField::Email,
        };
    }

    fn current_mut(&mut self) -> &mut String {
        match self.field {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
            AuthField::Name => &mut self.name,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.current_mut().push(c);
    }

    pub fn delete_char(&mut self) {
        self.current_mut().pop();
    }

    /// 校验必填项，返回错误消息
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err("Email and password are required");
        }
        if self.mode == AuthMode::Register && self.name.trim().is_empty() {
            return Err("Name is required");
        }
        Ok(())
    }

    /// 登出后重置，只保留邮箱
    pub fn reset_keep_email(&mut self) {
        let email = std::mem::take(&mut self.email);
        *self = Self {
            email,
            ..Self::default()
        };
    }
}

/// 渲染居中的登录表单
pub fn render(frame: &mut Frame, form: &AuthForm, colors: &ThemeColors) {
    let height = match form.mode {
        AuthMode::Login => 11,
        AuthMode::Register => 13,
    };
    let area = center_dialog(frame.area(), 56.min(frame.area().width), height);
    let title = match form.mode {
        AuthMode::Login => " Kiki Todo · Sign in ",
        AuthMode::Register => " Kiki Todo · Create account ",
    };
    let inner = render_dialog_frame(frame, area, title, colors.highlight, colors);

    let mut constraints = vec![
        Constraint::Length(1), // 顶部空行
        Constraint::Length(1), // Email
        Constraint::Length(1),
        Constraint::Length(1), // Password
        Constraint::Length(1),
    ];
    if form.mode == AuthMode::Register {
        constraints.push(Constraint::Length(1)); // Name
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Fill(1));
    constraints.push(Constraint::Length(1)); // 提示行
    let rows = Layout::vertical(constraints).split(inner);

    let masked = "•".repeat(form.password.chars().count());
    frame.render_widget(
        field_line("Email", &form.email, form.field == AuthField::Email, colors),
        rows[1],
    );
    frame.render_widget(
        field_line("Password", &masked, form.field == AuthField::Password, colors),
        rows[3],
    );
    if form.mode == AuthMode::Register {
        frame.render_widget(
            field_line("Name", &form.name, form.field == AuthField::Name, colors),
            rows[5],
        );
    }

    let switch_hint = match form.mode {
        AuthMode::Login => "register",
        AuthMode::Register => "sign in",
    };
    let hint_area = rows[rows.len() - 1];
    if form.submitting {
        let waiting = Paragraph::new(Line::from(Span::styled(
            "Please wait…",
            Style::default().fg(colors.muted),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(waiting, hint_area);
    } else {
        render_hint(
            frame,
            hint_area,
            &[
                ("Enter", "submit"),
                ("Tab", "next"),
                ("^R", switch_hint),
                ("Esc", "quit"),
            ],
            colors,
        );
    }
}

fn field_line<'a>(label: &'a str, value: &'a str, active: bool, colors: &ThemeColors) -> Paragraph<'a> {
    let label_style = if active {
        Style::default()
            .fg(colors.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.muted)
    };
    let mut spans = vec![
        Span::styled(format!("  {:<9}", label), label_style),
        Span::styled(value, Style::default().fg(colors.text)),
    ];
    if active {
        spans.push(Span::styled("█", Style::default().fg(colors.highlight)));
    }
    Paragraph::new(Line::from(spans))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_cycle_skips_name_in_login() {
        let mut form = AuthForm::default();
        form.next_field();
        assert_eq!(form.field, AuthField::Password);
        form.next_field();
        assert_eq!(form.field, AuthField::Email);

        form.toggle_mode();
        form.next_field();
        form.next_field();
        assert_eq!(form.field, AuthField::Name);
        form.toggle_mode();
        assert_eq!(form.mode, AuthMode::Login);
        assert_eq!(form.field, AuthField::Email);
    }

    #[test]
    fn test_input_goes_to_current_field() {
        let mut form = AuthForm::default();
        form.input_char('a');
        form.next_field();
        form.input_char('p');
        form.input_char('w');
        form.delete_char();
        assert_eq!(form.email, "a");
        assert_eq!(form.password, "p");
    }

    #[test]
    fn test_validate() {
        let mut form = AuthForm::default();
        assert_eq!(form.validate(), Err("Email and password are required"));
        form.email = "ana@example.com".into();
        form.password = "pw".into();
        assert_eq!(form.validate(), Ok(()));
        form.toggle_mode();
        assert_eq!(form.validate(), Err("Name is required"));
    }

    #[test]
    fn test_reset_keeps_email() {
        let mut form = AuthForm {
            email: "ana@example.com".into(),
            password: "pw".into(),
            mode: AuthMode::Register,
            ..AuthForm::default()
        };
        form.reset_keep_email();
        assert_eq!(form.email, "ana@example.com");
        assert!(form.password.is_empty());
        assert_eq!(form.mode, AuthMode::Login);
    }
}
