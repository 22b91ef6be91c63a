//! 页面渲染
//! 生成最小化的 HTML 页面，所有动态文本都经过转义

use crate::models::{offer::Offer, user::User};
use axum::response::Html;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

fn layout(title: &str, user: Option<&User>, body: &str) -> Html<String> {
    let nav = match user {
        Some(user) => {
            let admin_link = if user.is_admin {
                r#" <a href="/admin">Admin</a>"#
            } else {
                ""
            };
            format!(
                r#"<span class="user">{}</span>{} <a href="/logout">Log out</a>"#,
                text(&user.username),
                admin_link
            )
        }
        None => r#"<a href="/login">Log in</a> <a href="/register">Register</a>"#.to_string(),
    };

    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body>\n<nav><a href=\"/\">Home</a> {}</nav>\n<main>\n{}</main>\n</body>\n</html>\n",
        text(title),
        nav,
        body
    ))
}

/// 首页：目录列表
pub fn index(user: Option<&User>, offers: &[Offer]) -> Html<String> {
    let mut body = String::from("<h1>Offers</h1>\n<ul class=\"offers\">\n");
    for offer in offers {
        let _ = writeln!(
            body,
            r#"<li><a href="/offer/{}"><img src="/static/{}" alt="{}"> {}</a> {}</li>"#,
            offer.id,
            attr(&offer.image),
            attr(&offer.title),
            text(&offer.title),
            text(&offer.description)
        );
    }
    body.push_str("</ul>\n");

    layout("Offers", user, &body)
}

/// 产品详情页
pub fn offer(user: &User, offer: &Offer) -> Html<String> {
    let body = format!(
        "<h1>{}</h1>\n<img src=\"/static/{}\" alt=\"{}\">\n<p>{}</p>\n",
        text(&offer.title),
        attr(&offer.image),
        attr(&offer.title),
        text(&offer.description)
    );

    layout(&offer.title, Some(user), &body)
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}\">\n\
         <label>Username <input name=\"username\" required></label>\n\
         <label>Password <input name=\"password\" type=\"password\" required></label>\n\
         <button type=\"submit\">{}</button>\n</form>\n",
        action, submit
    )
}

pub fn register() -> Html<String> {
    let body = format!("<h1>Register</h1>\n{}", credentials_form("/register", "Register"));
    layout("Register", None, &body)
}

pub fn login() -> Html<String> {
    let body = format!("<h1>Log in</h1>\n{}", credentials_form("/login", "Log in"));
    layout("Log in", None, &body)
}

/// 管理面板：用户列表与操作按钮
pub fn admin(actor: &User, users: &[User]) -> Html<String> {
    let mut body = String::from(
        "<h1>Users</h1>\n<table>\n<tr><th>ID</th><th>Username</th><th>Admin</th>\
         <th>Blocked</th><th>Registered</th><th></th></tr>\n",
    );

    for user in users {
        let actions = if user.id == actor.id {
            String::new()
        } else {
            format!(
                "<form method=\"post\" action=\"/admin/block/{id}\"><button>{block}</button></form>\
                 <form method=\"post\" action=\"/admin/make_admin/{id}\"><button>{admin}</button></form>",
                id = user.id,
                block = if user.is_blocked { "Unblock" } else { "Block" },
                admin = if user.is_admin { "Revoke admin" } else { "Make admin" },
            )
        };

        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            user.id,
            text(&user.username),
            if user.is_admin { "yes" } else { "no" },
            if user.is_blocked { "yes" } else { "no" },
            user.created_at.format("%Y-%m-%d %H:%M"),
            actions
        );
    }
    body.push_str("</table>\n");

    layout("Admin", Some(actor), &body)
}
