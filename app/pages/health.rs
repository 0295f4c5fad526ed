use crate::Context;
use hyper::{Body, Request, Response, StatusCode};

pub async fn get(_context: &Context, _request: Request<Body>) -> anyhow::Result<Response<Body>> {
	let response = Response::builder()
		.status(StatusCode::OK)
		.body(Body::from("ok"))?;
	Ok(response)
}
