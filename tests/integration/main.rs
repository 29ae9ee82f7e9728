mod helpers;
mod pagination_flow;
mod rendering;
