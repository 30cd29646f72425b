use super::{Deferred, Effect, SiteController};
use crate::auth::{AuthError, AuthForm, LoginForm, PasswordField, RegisterForm};
use crate::notify::NoticeKind;
use crate::timer::Scheduler;

impl<S: Scheduler<Deferred>> SiteController<S> {
    /// Login is only checked after the simulated round-trip.
    pub(super) fn submit_login(&mut self, form: LoginForm) -> Vec<Effect> {
        self.state.loading.insert(AuthForm::Login);
        self.scheduler
            .schedule(self.config.auth.processing_ms, Deferred::SettleLogin(form));
        vec![Effect::SetAuthLoading {
            form: AuthForm::Login,
            loading: true,
        }]
    }

    pub(super) fn settle_login(&mut self, form: &LoginForm) -> Vec<Effect> {
        if form.is_complete() {
            let effects = self.notify_key("notice.auth.login_ok", NoticeKind::Success);
            let target = self.config.auth.login_redirect.clone();
            self.scheduler
                .schedule(self.config.auth.redirect_ms, Deferred::Navigate(target));
            return effects;
        }
        log::info!("login rejected: {}", AuthError::MissingFields);
        self.state.loading.remove(&AuthForm::Login);
        let mut effects = self.notify_key(AuthError::MissingFields.message_key(), NoticeKind::Error);
        effects.push(Effect::SetAuthLoading {
            form: AuthForm::Login,
            loading: false,
        });
        effects
    }

    /// Registration is validated up front; a rejected form starts no timer.
    pub(super) fn submit_register(&mut self, form: &RegisterForm) -> Vec<Effect> {
        if let Err(err) = form.validate() {
            log::info!("registration rejected: {err}");
            return self.notify_key(err.message_key(), NoticeKind::Error);
        }
        self.state.loading.insert(AuthForm::Register);
        self.scheduler
            .schedule(self.config.auth.processing_ms, Deferred::SettleRegister);
        vec![Effect::SetAuthLoading {
            form: AuthForm::Register,
            loading: true,
        }]
    }

    pub(super) fn settle_register(&mut self) -> Vec<Effect> {
        let effects = self.notify_key("notice.auth.register_ok", NoticeKind::Success);
        let target = self.config.auth.register_redirect.clone();
        self.scheduler
            .schedule(self.config.auth.redirect_ms, Deferred::Navigate(target));
        effects
    }

    pub(super) fn toggle_password(&mut self, field: PasswordField) -> Vec<Effect> {
        let visible = !self.state.visible_passwords.remove(&field);
        if visible {
            self.state.visible_passwords.insert(field);
        }
        let glyph = self
            .catalog
            .t(if visible { "password.hide" } else { "password.show" });
        vec![Effect::SetPasswordVisible {
            field,
            visible,
            glyph,
        }]
    }
}
