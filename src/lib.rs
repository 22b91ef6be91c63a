//! 旅游门户库
//! 注册登录、旅游产品目录与用户管理

pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod views;
