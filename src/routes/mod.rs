use actix_web::web::{scope, ServiceConfig};
use actix_web::Scope;
use auth::auth_routes::{change_password, login, logout, session_status, setup_admin};
use events::live_events;
use orders::{delete_order, get_order, list_orders, submit_order, update_order};
use projects::{
    create_project, delete_project, get_project, get_projects, list_admin_projects,
    update_project,
};
use settings::{get_admin_settings, get_site_settings, update_setting};
use stats::{get_admin_stats, get_public_stats};
use translate::translate_text;
use uploads::upload_image;
mod auth;
mod events;
mod health_check;
mod orders;
mod projects;
mod settings;
mod stats;
mod translate;
mod uploads;

use crate::routes::health_check::*;

fn public_routes() -> Scope {
    scope("")
        .service(get_projects)
        .service(get_public_stats)
        .service(get_site_settings)
        .service(submit_order)
}

fn admin_projects_routes() -> Scope {
    scope("projects")
        .service(list_admin_projects)
        .service(create_project)
        .service(get_project)
        .service(update_project)
        .service(delete_project)
}

fn admin_orders_routes() -> Scope {
    scope("orders")
        .service(list_orders)
        .service(get_order)
        .service(update_order)
        .service(delete_order)
}

fn admin_routes() -> Scope {
    scope("admin")
        // session
        .service(setup_admin)
        .service(login)
        .service(logout)
        .service(session_status)
        .service(change_password)
        .service(admin_projects_routes())
        .service(admin_orders_routes())
        .service(get_admin_settings)
        .service(update_setting)
        .service(get_admin_stats)
        .service(upload_image)
        .service(translate_text)
        .service(live_events)
}

pub fn cipet_routes(conf: &mut ServiceConfig) {
    conf.service(health_check).service(
        scope("api")
            .service(admin_routes())
            .service(public_routes()),
    );
}
