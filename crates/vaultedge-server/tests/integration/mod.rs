mod auth_flow;
mod contact;
mod pages;
