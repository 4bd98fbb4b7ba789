//! Auth Form Component
//!
//! Client-side sign-in: name, email and organization. Nothing is verified;
//! the organization name picks the inventory partition.

use leptos::prelude::*;

use inventory_core::domain::Session;

#[component]
pub fn AuthForm(#[prop(into)] on_login: Callback<Session>) -> impl IntoView {
    let (registering, set_registering) = signal(false);
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (org_name, set_org_name) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match Session::register(&name.get(), &email.get(), &org_name.get()) {
            Ok(session) => {
                set_error.set(None);
                on_login.run(session);
            }
            Err(e) => set_error.set(Some(e.to_string())),
        }
    };

    view! {
        <div class="auth-screen">
            <div class="auth-card">
                <div class="auth-pitch">
                    <h1 class="brand-title">"Inventory" <span class="accent">"Pro"</span></h1>
                    <h2>"Enterprise " <span class="gradient">"Asset Intelligence."</span></h2>
                    <p>"Vision-assisted inventory control with per-organization data isolation."</p>
                    <ul class="auth-features">
                        <li>"Data Isolation"</li>
                        <li>"Vision Ready"</li>
                        <li>"Verified Ops"</li>
                    </ul>
                </div>
                <form class="auth-form" on:submit=submit>
                    <h3>{move || if registering.get() { "Register Organization" } else { "Operator Sign-In" }}</h3>
                    <label>"Full Operator Name"</label>
                    <input
                        type="text"
                        placeholder="E.g. James Sterling"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                    <label>"Professional Email"</label>
                    <input
                        type="email"
                        placeholder="name@organization.com"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <label>"Company / Branch Name"</label>
                    <input
                        type="text"
                        placeholder="E.g. Sterling Logistics"
                        prop:value=move || org_name.get()
                        on:input=move |ev| set_org_name.set(event_target_value(&ev))
                    />
                    {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                    <button type="submit" class="primary-btn">
                        {move || if registering.get() { "Create Workspace" } else { "Access Repository" }}
                    </button>
                    <button type="button" class="link-btn" on:click=move |_| set_registering.update(|v| *v = !*v)>
                        {move || if registering.get() { "Already registered? Sign in" } else { "New organization? Register" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
