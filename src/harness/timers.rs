use super::*;

/// Delay used for `requestAnimationFrame` callbacks on the virtual clock.
const ANIMATION_FRAME_MS: i64 = 16;

impl Harness {
    pub fn now_ms(&self) -> i64 {
        self.scheduler.now_ms
    }

    pub fn clear_timer(&mut self, timer_id: i64) -> bool {
        self.clear_timeout(timer_id)
    }

    pub fn clear_all_timers(&mut self) -> usize {
        let cleared = self.scheduler.task_queue.len();
        self.scheduler.task_queue.clear();
        self.trace_timer_line(format!("[timer] clear_all cleared={cleared}"));
        cleared
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .scheduler
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
                kind: task.kind,
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.scheduler.now_ms;
        self.scheduler.now_ms = self.scheduler.now_ms.saturating_add(delta_ms);
        let ran = self.run_timer_queue(self.scheduler.now_ms)?;
        self.trace_timer_line(format!(
            "[timer] advance delta_ms={} from={} to={} ran_due={}",
            delta_ms, from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.scheduler.now_ms {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.scheduler.now_ms
            )));
        }
        let from = self.scheduler.now_ms;
        self.scheduler.now_ms = target_ms;
        let ran = self.run_timer_queue(target_ms)?;
        self.trace_timer_line(format!(
            "[timer] advance_to from={} to={} ran_due={}",
            from, self.scheduler.now_ms, ran
        ));
        Ok(())
    }

    /// Runs timers and settles requests until the page is idle.
    ///
    /// Pending requests settle before the clock moves, so a response always
    /// lands ahead of any timer scheduled after it was issued.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.scheduler.now_ms;
        let mut timer_steps = 0usize;
        let mut fetch_steps = 0usize;
        loop {
            if !self.network.pending.is_empty() {
                fetch_steps += 1;
                if fetch_steps > self.network.fetch_step_limit {
                    return Err(self.fetch_step_limit_error(fetch_steps));
                }
                self.settle_next_fetch()?;
                continue;
            }
            let Some(next_idx) = self.next_task_index(None) else {
                break;
            };
            timer_steps += 1;
            if timer_steps > self.scheduler.timer_step_limit {
                return Err(self.timer_step_limit_error(
                    self.scheduler.timer_step_limit,
                    timer_steps,
                    None,
                ));
            }
            let task = self.scheduler.task_queue.remove(next_idx);
            if task.due_at > self.scheduler.now_ms {
                self.scheduler.now_ms = task.due_at;
            }
            self.execute_timer_task(task)?;
        }
        self.trace_timer_line(format!(
            "[timer] flush from={} to={} timers={} fetches={}",
            from, self.scheduler.now_ms, timer_steps, fetch_steps
        ));
        Ok(())
    }

    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(next_idx) = self.next_task_index(None) else {
            self.trace_timer_line("[timer] run_next none".into());
            return Ok(false);
        };

        let task = self.scheduler.task_queue.remove(next_idx);
        if task.due_at > self.scheduler.now_ms {
            self.scheduler.now_ms = task.due_at;
        }
        self.execute_timer_task(task)?;
        Ok(true)
    }

    pub fn run_due_timers(&mut self) -> Result<usize> {
        let ran = self.run_timer_queue(self.scheduler.now_ms)?;
        self.trace_timer_line(format!(
            "[timer] run_due now_ms={} ran={}",
            self.scheduler.now_ms, ran
        ));
        Ok(ran)
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Runtime(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.scheduler.timer_step_limit = max_steps;
        Ok(())
    }

    pub(crate) fn set_timeout(&mut self, delay_ms: i64) -> i64 {
        self.schedule_task(TimerKind::Timeout, delay_ms)
    }

    pub(crate) fn request_animation_frame(&mut self) -> i64 {
        self.schedule_task(TimerKind::AnimationFrame, ANIMATION_FRAME_MS)
    }

    pub(crate) fn clear_timeout(&mut self, timer_id: i64) -> bool {
        let before = self.scheduler.task_queue.len();
        self.scheduler.task_queue.retain(|task| task.id != timer_id);
        let existed = self.scheduler.task_queue.len() != before;
        self.trace_timer_line(format!("[timer] clear id={timer_id} existed={existed}"));
        existed
    }

    fn schedule_task(&mut self, kind: TimerKind, delay_ms: i64) -> i64 {
        let delay_ms = delay_ms.max(0);
        let id = self.scheduler.allocate_timer_id();
        let order = self.scheduler.allocate_task_order();
        let due_at = self.scheduler.now_ms.saturating_add(delay_ms);
        self.scheduler.task_queue.push(ScheduledTask {
            id,
            due_at,
            order,
            kind,
        });
        self.trace_timer_line(format!(
            "[timer] schedule id={id} kind={kind:?} due_at={due_at} delay_ms={delay_ms}"
        ));
        id
    }

    fn run_timer_queue(&mut self, due_limit: i64) -> Result<usize> {
        let mut steps = 0usize;
        while let Some(next_idx) = self.next_task_index(Some(due_limit)) {
            steps += 1;
            if steps > self.scheduler.timer_step_limit {
                return Err(self.timer_step_limit_error(
                    self.scheduler.timer_step_limit,
                    steps,
                    Some(due_limit),
                ));
            }
            let task = self.scheduler.task_queue.remove(next_idx);
            self.execute_timer_task(task)?;
        }
        Ok(steps)
    }

    fn timer_step_limit_error(
        &self,
        max_steps: usize,
        steps: usize,
        due_limit: Option<i64>,
    ) -> Error {
        let due_limit_desc = due_limit
            .map(|value| value.to_string())
            .unwrap_or_else(|| "none".into());

        let next_task_desc = self
            .next_task_index(due_limit)
            .and_then(|idx| self.scheduler.task_queue.get(idx))
            .map(|task| {
                format!(
                    "id={},due_at={},order={},kind={:?}",
                    task.id, task.due_at, task.order, task.kind
                )
            })
            .unwrap_or_else(|| "none".into());

        Error::Runtime(format!(
            "flush exceeded max task steps: limit={max_steps}, steps={steps}, now_ms={}, due_limit={}, pending_tasks={}, next_task={}",
            self.scheduler.now_ms,
            due_limit_desc,
            self.scheduler.task_queue.len(),
            next_task_desc
        ))
    }

    fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.scheduler
            .task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }

    fn execute_timer_task(&mut self, task: ScheduledTask) -> Result<()> {
        self.trace_timer_line(format!(
            "[timer] run id={} kind={:?} due_at={} now_ms={}",
            task.id, task.kind, task.due_at, self.scheduler.now_ms
        ));
        self.with_widget(|widget, host| widget.on_timer(host, task.id))?;
        Ok(())
    }
}
