use crate::error::AnsibleError;
use crate::modules::ModuleInvocation;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

pub const DEFAULT_PLAYBOOK_NAME: &str = "Unnamed playbook";
pub const DEFAULT_HOST_PATTERN: &str = "all";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(default)]
    pub modules: Vec<ModuleInvocation>,
}

impl Task {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            modules: Vec::new(),
        }
    }

    pub fn add_module(mut self, module: ModuleInvocation) -> Self {
        self.modules.push(module);
        self
    }

    /// `name` 加上所有模块片段合并后的映射；后加入的同名模块会覆盖前面的
    fn to_mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();
        mapping.insert(Value::from("name"), Value::from(self.name.as_str()));
        for module in &self.modules {
            for (key, value) in module.to_fragment() {
                mapping.insert(key, value);
            }
        }
        mapping
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playbook {
    pub name: String,
    pub hosts: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Default for Playbook {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLAYBOOK_NAME.to_string(),
            hosts: DEFAULT_HOST_PATTERN.to_string(),
            tasks: Vec::new(),
        }
    }
}

impl Playbook {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_hosts(mut self, pattern: &str) -> Self {
        self.hosts = pattern.to_string();
        self
    }

    pub fn add_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// 生成 ansible-playbook 所需的文档结构: 只包含一个 play 的列表
    pub fn to_document(&self) -> Value {
        let tasks = self
            .tasks
            .iter()
            .map(|task| Value::Mapping(task.to_mapping()))
            .collect();

        let mut play = Mapping::new();
        play.insert(Value::from("name"), Value::from(self.name.as_str()));
        play.insert(Value::from("hosts"), Value::from(self.hosts.as_str()));
        play.insert(Value::from("tasks"), Value::Sequence(tasks));

        Value::Sequence(vec![Value::Mapping(play)])
    }

    pub fn to_yaml(&self) -> Result<String, AnsibleError> {
        serde_yaml::to_string(&self.to_document())
            .map_err(|e| AnsibleError::SerializationError(format!("Failed to serialize playbook: {}", e)))
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), AnsibleError> {
        let yaml_content = self.to_yaml()?;

        std::fs::write(path, yaml_content)
            .map_err(|e| AnsibleError::FileOperationError(format!("Failed to write playbook file: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::builtin;

    fn first_play() -> Playbook {
        Playbook::new("My first play")
            .with_hosts("myhosts")
            .add_task(Task::new("Ping my hosts").add_module(builtin::ping()))
            .add_task(Task::new("Print message").add_module(builtin::debug("Hello world")))
    }

    #[test]
    fn test_playbook_defaults() {
        let playbook = Playbook::default();
        assert_eq!(playbook.name, "Unnamed playbook");
        assert_eq!(playbook.hosts, "all");
        assert!(playbook.tasks.is_empty());

        let renamed = Playbook::default().with_name("Renamed");
        assert_eq!(renamed.name, "Renamed");
        assert_eq!(renamed.hosts, "all");
    }

    #[test]
    fn test_playbook_document_structure() {
        let document = first_play().to_document();

        let plays = document.as_sequence().expect("document should be a list");
        assert_eq!(plays.len(), 1);

        let play = &plays[0];
        assert_eq!(play["name"], Value::from("My first play"));
        assert_eq!(play["hosts"], Value::from("myhosts"));

        let tasks = play["tasks"].as_sequence().expect("tasks should be a list");
        assert_eq!(tasks.len(), 2);

        assert_eq!(tasks[0]["name"], Value::from("Ping my hosts"));
        let ping_task = tasks[0].as_mapping().unwrap();
        assert!(ping_task.contains_key("ansible.builtin.ping"));

        assert_eq!(tasks[1]["name"], Value::from("Print message"));
        assert_eq!(
            tasks[1]["ansible.builtin.debug"]["msg"],
            Value::from("Hello world")
        );
    }

    #[test]
    fn test_playbook_yaml_text() {
        let yaml = first_play().to_yaml().unwrap();

        assert!(yaml.contains("- name: My first play"));
        assert!(yaml.contains("hosts: myhosts"));
        assert!(yaml.contains("tasks:"));
        assert!(yaml.contains("- name: Ping my hosts"));
        assert!(yaml.contains("ansible.builtin.ping:"));
        assert!(yaml.contains("- name: Print message"));
        assert!(yaml.contains("ansible.builtin.debug:"));
        assert!(yaml.contains("msg: Hello world"));

        // 能够被重新解析为同样的文档
        let reparsed: Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(reparsed, first_play().to_document());
    }

    #[test]
    fn test_modules_merge_into_one_task() {
        let playbook = Playbook::default().add_task(
            Task::new("Several modules")
                .add_module(builtin::ping())
                .add_module(builtin::debug("first"))
                .add_module(builtin::debug("second")),
        );

        let document = playbook.to_document();
        let task = document[0]["tasks"][0].as_mapping().unwrap();

        assert_eq!(task.len(), 3);
        assert!(task.contains_key("ansible.builtin.ping"));
        assert_eq!(
            task["ansible.builtin.debug"]["msg"],
            Value::from("second")
        );
    }

    #[test]
    fn test_task_without_modules() {
        let document = Playbook::default()
            .add_task(Task::new("Nothing to do"))
            .to_document();

        let task = document[0]["tasks"][0].as_mapping().unwrap();
        assert_eq!(task.len(), 1);
        assert_eq!(task["name"], Value::from("Nothing to do"));
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.yml");

        first_play().save_to_file(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, first_play().to_yaml().unwrap());
    }
}
