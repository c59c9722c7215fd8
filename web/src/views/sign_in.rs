use dioxus::prelude::*;
use types::{UserType, access::post_sign_in_target};
use ui::ErrorBanner;

use crate::{Route, auth::use_auth};

#[component]
pub fn AdminSignIn(redirect: Option<String>) -> Element {
    rsx! {
        SignInForm { user_type: UserType::Admin, redirect }
    }
}

#[component]
pub fn UserSignIn(redirect: Option<String>) -> Element {
    rsx! {
        SignInForm { user_type: UserType::User, redirect }
    }
}

#[component]
fn SignInForm(user_type: UserType, redirect: ReadSignal<Option<String>>) -> Element {
    let mut auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let target = move || Route::from_path(&post_sign_in_target(user_type, redirect().as_deref()));

    // Already signed in with this role; skip the form.
    if !auth.is_loading() && auth.user_type() == Some(user_type) {
        navigator().replace(target());
    }

    let can_submit =
        !email.read().trim().is_empty() && !password.read().is_empty() && !submitting();

    let on_submit = move |e: FormEvent| {
        e.prevent_default();
        if !can_submit {
            return;
        }
        submitting.set(true);
        error.set(None);

        let api = auth.api();
        spawn(async move {
            let email = email.peek().trim().to_string();
            let password = password.peek().clone();
            let result = api.sign_in(user_type, &email, &password).await;
            submitting.set(false);

            match result {
                Ok(response) => {
                    auth.login(response.into_session(user_type));
                    navigator().replace(target());
                }
                Err(e) => {
                    tracing::info!(error = %e, %user_type, "sign-in failed");
                    let message = if e.is_unauthorized() {
                        "Invalid email or password.".to_string()
                    } else {
                        e.to_string()
                    };
                    error.set(Some(message));
                }
            }
        });
    };

    let heading = match user_type {
        UserType::Admin => "Administrator sign in",
        UserType::User => "Sign in to your account",
    };

    rsx! {
        form { class: "login-form", onsubmit: on_submit,
            h2 { class: "login-subtitle", "{heading}" }
            if let Some(message) = error() {
                ErrorBanner { message, on_dismiss: move |_| error.set(None) }
            }
            div { class: "form-group",
                label { class: "form-label", r#for: "sign-in-email", "Email" }
                input {
                    id: "sign-in-email",
                    class: "form-input",
                    r#type: "email",
                    autocomplete: "username",
                    disabled: submitting(),
                    value: "{email}",
                    oninput: move |e| email.set(e.value()),
                }
            }
            div { class: "form-group",
                label { class: "form-label", r#for: "sign-in-password", "Password" }
                input {
                    id: "sign-in-password",
                    class: "form-input",
                    r#type: "password",
                    autocomplete: "current-password",
                    disabled: submitting(),
                    value: "{password}",
                    oninput: move |e| password.set(e.value()),
                }
            }
            button {
                r#type: "submit",
                class: "btn btn-primary login-btn",
                disabled: !can_submit,
                if submitting() { "Signing in..." } else { "Sign in" }
            }
        }
    }
}
