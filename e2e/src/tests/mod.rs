//! Test registry - all test cases are registered here


use crate::runner::TestCase;

/// Build and return all test cases
///
/// Tests are grouped by category. Each test:
/// 1. Optionally queues a mock backend response (what LangGraph would return)
/// 2. Sends a request to the REAL proxy
/// 3. Validates the response and what the backend received
pub fn all_tests() -> Vec<TestCase> {
    macro_rules! test {
        ($name:expr, $desc:expr, $func:path) => {
            TestCase {
                name: $name,
                description: $desc,
                run: |ctx| Box::pin($func(ctx)),
            }
        };
    }

    vec![
        // ── Passthrough contract ───────────────────────────────────────────────
        test!(
            "proxy/options_preflight",
            "OPTIONS returns 204, empty body, the three CORS headers, no backend call",
            proxy::test_options_preflight
        ),
        test!(
            "proxy/prefix_stripped",
            "Forwarded path equals incoming path with /api removed",
            proxy::test_prefix_stripped
        ),
        test!(
            "proxy/query_params_filtered",
            "_path and nxtP_path never reach the backend; other params survive",
            proxy::test_query_params_filtered
        ),
        test!(
            "proxy/post_body_passthrough",
            "POST body arrives at the backend byte-identical",
            proxy::test_post_body_passthrough
        ),
        test!(
            "proxy/put_and_patch_bodies_forwarded",
            "PUT and PATCH bodies are forwarded like POST",
            proxy::test_put_and_patch_bodies_forwarded
        ),
        test!(
            "proxy/delete_forwarded",
            "DELETE is forwarded without a body",
            proxy::test_delete_forwarded
        ),
        test!(
            "proxy/api_key_injected",
            "Configured x-api-key is attached to every forwarded request",
            proxy::test_api_key_injected
        ),
        test!(
            "proxy/inbound_api_key_discarded",
            "A client-supplied x-api-key never reaches the backend",
            proxy::test_inbound_api_key_discarded
        ),
        test!(
            "proxy/cors_on_forwarded_response",
            "Forwarded responses carry the three CORS headers",
            proxy::test_cors_on_forwarded_response
        ),
        test!(
            "proxy/backend_error_passthrough",
            "Backend 4xx/5xx responses are forwarded with status and body intact",
            proxy::test_backend_error_passthrough
        ),
        test!(
            "proxy/health_is_local",
            "/health is answered by the proxy itself, not forwarded",
            proxy::test_health_is_local
        ),

        // ── Thread/run wire flow ───────────────────────────────────────────────
        test!(
            "flow/create_thread",
            "POST /api/threads yields a thread id from the backend",
            flow::test_create_thread
        ),
        test!(
            "flow/run_stream_events",
            "Streamed run events pass through the proxy in order",
            flow::test_run_stream_events
        ),
        test!(
            "flow/thread_created_once_before_run",
            "Session flow: one thread creation strictly before the run stream",
            flow::test_thread_created_once_before_run
        ),
    ]
}
