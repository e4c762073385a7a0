use super::*;

use crate::fetch::RequestInit;

impl Harness {
    /// Registers the outcome for requests to `(method, url)`. Later mocks for
    /// the same key replace earlier ones.
    pub fn set_fetch_mock(&mut self, method: Method, url: &str, mock: FetchMock) {
        self.network.mocks.insert((method, url.to_string()), mock);
    }

    pub fn clear_fetch_mocks(&mut self) {
        self.network.mocks.clear();
    }

    /// Drains every request issued so far, settled or not.
    pub fn take_fetch_calls(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.network.calls)
    }

    pub fn pending_fetches(&self) -> Vec<FetchRequest> {
        self.network.pending.iter().cloned().collect()
    }

    /// Settles one pending request from its mock. Returns `false` if `id` is
    /// not pending.
    pub fn settle_fetch(&mut self, id: FetchId) -> Result<bool> {
        let Some(request) = self.network.pending.iter().find(|request| request.id == id) else {
            return Ok(false);
        };
        let outcome = self.mock_outcome(request)?;
        let Some(request) = self.network.take_pending(id) else {
            return Ok(false);
        };
        self.deliver_fetch(request, outcome)?;
        Ok(true)
    }

    /// Settles pending requests in issue order, including any issued while
    /// settling, until none remain.
    pub fn settle_fetches(&mut self) -> Result<usize> {
        let mut steps = 0usize;
        while !self.network.pending.is_empty() {
            steps += 1;
            if steps > self.network.fetch_step_limit {
                return Err(self.fetch_step_limit_error(steps));
            }
            self.settle_next_fetch()?;
        }
        Ok(steps)
    }

    /// Settles a pending request with an explicit outcome, bypassing mocks.
    pub fn respond_to_fetch(&mut self, id: FetchId, outcome: FetchOutcome) -> Result<bool> {
        let Some(request) = self.network.take_pending(id) else {
            return Ok(false);
        };
        self.deliver_fetch(request, outcome)?;
        Ok(true)
    }

    pub fn set_fetch_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Runtime(
                "set_fetch_step_limit requires at least 1 step".into(),
            ));
        }
        self.network.fetch_step_limit = max_steps;
        Ok(())
    }

    pub(crate) fn start_fetch(&mut self, init: RequestInit) -> FetchId {
        let id = self.network.allocate_fetch_id();
        let request = init.into_request(id);
        tracing::debug!(id = id.value(), method = %request.method, url = %request.url, "fetch issued");
        self.trace_fetch_line(format!(
            "[fetch] start id={} {} {}",
            id, request.method, request.url
        ));
        self.network.calls.push(request.clone());
        self.network.pending.push_back(request);
        id
    }

    pub(crate) fn settle_next_fetch(&mut self) -> Result<()> {
        let Some(request) = self.network.pending.front() else {
            return Ok(());
        };
        let outcome = self.mock_outcome(request)?;
        if let Some(request) = self.network.pending.pop_front() {
            self.deliver_fetch(request, outcome)?;
        }
        Ok(())
    }

    pub(crate) fn fetch_step_limit_error(&self, steps: usize) -> Error {
        let next = self
            .network
            .pending
            .front()
            .map(|request| format!("id={},{} {}", request.id, request.method, request.url))
            .unwrap_or_else(|| "none".into());
        Error::Runtime(format!(
            "settling exceeded max fetch steps: limit={}, steps={steps}, pending={}, next_fetch={next}",
            self.network.fetch_step_limit,
            self.network.pending.len()
        ))
    }

    fn mock_outcome(&self, request: &FetchRequest) -> Result<FetchOutcome> {
        self.network
            .mocks
            .get(&(request.method, request.url.clone()))
            .map(FetchMock::to_outcome)
            .ok_or_else(|| Error::FetchMockNotFound {
                method: request.method.to_string(),
                url: request.url.clone(),
            })
    }

    fn deliver_fetch(&mut self, request: FetchRequest, outcome: FetchOutcome) -> Result<()> {
        tracing::debug!(id = request.id.value(), outcome = %outcome.describe(), "fetch settled");
        self.trace_fetch_line(format!(
            "[fetch] settle id={} {} {} {}",
            request.id,
            request.method,
            request.url,
            outcome.describe()
        ));
        self.with_widget(|widget, host| widget.on_fetch_settled(host, request.id, outcome))?;
        Ok(())
    }
}
